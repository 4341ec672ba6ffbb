//! Breach lookup collaborator.
//!
//! The estimator asks a `BreachCheck` whether a candidate is known to be
//! leaked. Lookups are advisory: an implementation that cannot answer
//! (network down, bad response) must return `false`.

use std::collections::HashSet;

pub trait BreachCheck {
    fn is_breached(&self, candidate: &str) -> bool;
}

/// Never reports a breach.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBreachCheck;

impl BreachCheck for NoBreachCheck {
    fn is_breached(&self, _candidate: &str) -> bool {
        false
    }
}

/// Fixed in-memory list of leaked passwords.
#[derive(Debug, Clone, Default)]
pub struct KnownBreached {
    entries: HashSet<String>,
}

impl KnownBreached {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// One password per line; blank lines are skipped.
    pub fn from_list(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BreachCheck for KnownBreached {
    fn is_breached(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }
}

impl<F> BreachCheck for F
where
    F: Fn(&str) -> bool,
{
    fn is_breached(&self, candidate: &str) -> bool {
        self(candidate)
    }
}
