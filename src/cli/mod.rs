//! CLI definitions and command implementations for sealbox.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sealbox - encrypt files with a password
#[derive(Parser)]
#[command(name = "sealbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/sealbox/sealbox.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt files into `<name>.encrypted` containers
    Encrypt {
        /// Files to encrypt
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password (prompted when omitted)
        #[arg(long, env = "SEALBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,

        /// Offline list of leaked passwords, one per line
        #[arg(long, value_name = "FILE")]
        breach_list: Option<PathBuf>,

        /// Encrypt even if the password is weak, without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Decrypt `.encrypted` containers, restoring the original filename
    Decrypt {
        /// Containers to decrypt
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password (prompted when omitted)
        #[arg(long, env = "SEALBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Generate strong passwords or passphrases
    Generate {
        /// Generate a word-based passphrase instead
        #[arg(short, long)]
        passphrase: bool,

        /// Password length (default from config)
        #[arg(short, long)]
        length: Option<usize>,

        /// How many to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Rate a password's strength
    Check {
        /// Password to rate (prompted when omitted)
        #[arg(long, env = "SEALBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Offline list of leaked passwords, one per line
        #[arg(long, value_name = "FILE")]
        breach_list: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}
