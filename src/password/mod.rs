//! Password helpers: strength estimation and secret generation.
//!
//! Both are stateless; the only external input is the optional
//! [`BreachCheck`] collaborator.

pub mod breach;
pub mod generator;
pub mod strength;

pub use breach::{BreachCheck, KnownBreached, NoBreachCheck};
pub use generator::{generate_passphrase, generate_password, DEFAULT_PASSWORD_LENGTH};
pub use strength::{
    entropy, evaluate, evaluate_passphrase, evaluate_with, Finding, StrengthLevel, StrengthResult,
};
