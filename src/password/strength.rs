//! Password strength scoring.
//!
//! Entropy is `log2(charset) * length`, where the charset size only counts
//! which character classes appear. Pattern and word checks add findings on
//! top but never change the level; a positive breach lookup forces `Weak`.

use super::breach::{BreachCheck, NoBreachCheck};
use serde::Serialize;
use std::fmt;

/// Special characters counted as one class (26 of them)
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Shorter than this is flagged "too short"
pub const MIN_LENGTH: usize = 8;

const MIN_ENTROPY_FOR_MEDIUM: f64 = 40.0;
const MIN_ENTROPY_FOR_STRONG: f64 = 80.0;

const COMMON_WORDS: &[&str] = &[
    "password", "admin", "123456", "welcome", "qwerty", "monkey", "dragon", "letmein", "football",
    "iloveyou",
];

const DIGIT_RUNS: &[&str] = &["123", "234", "345", "456", "567", "789"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    None,
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "None",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        };
        f.write_str(s)
    }
}

/// One observation about a candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Finding {
    EnterPassword,
    TooShort,
    CommonPattern,
    CommonWord,
    LowVariety,
    Breached,
    LooksStrong,
}

impl Finding {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EnterPassword => "Enter a password",
            Self::TooShort => "Too short (min 8 chars)",
            Self::CommonPattern => "Avoid common patterns",
            Self::CommonWord => "Avoid common words",
            Self::LowVariety => "Add more character variety",
            Self::Breached => "Password appeared in breaches!",
            Self::LooksStrong => "Strong password!",
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthResult {
    pub level: StrengthLevel,
    pub reasons: Vec<Finding>,
    /// Estimated bits, 0 for empty input
    pub entropy: f64,
}

/// Score `candidate` without any breach signal.
pub fn evaluate(candidate: &str) -> StrengthResult {
    evaluate_with(candidate, &NoBreachCheck)
}

/// Passphrases are scored exactly like passwords.
pub fn evaluate_passphrase(candidate: &str, breaches: &dyn BreachCheck) -> StrengthResult {
    evaluate_with(candidate, breaches)
}

/// Score `candidate`, consulting `breaches` for non-empty input.
pub fn evaluate_with(candidate: &str, breaches: &dyn BreachCheck) -> StrengthResult {
    if candidate.is_empty() {
        return StrengthResult {
            level: StrengthLevel::None,
            reasons: vec![Finding::EnterPassword],
            entropy: 0.0,
        };
    }

    let entropy = entropy(candidate);
    let mut reasons = Vec::new();

    if candidate.chars().count() < MIN_LENGTH {
        reasons.push(Finding::TooShort);
    }
    if matches_common_pattern(candidate) {
        reasons.push(Finding::CommonPattern);
    }
    if contains_common_word(candidate) {
        reasons.push(Finding::CommonWord);
    }

    let mut level = if entropy < MIN_ENTROPY_FOR_MEDIUM {
        reasons.push(Finding::LowVariety);
        StrengthLevel::Weak
    } else if entropy < MIN_ENTROPY_FOR_STRONG {
        StrengthLevel::Medium
    } else {
        StrengthLevel::Strong
    };

    if breaches.is_breached(candidate) {
        level = StrengthLevel::Weak;
        reasons.push(Finding::Breached);
    }

    if reasons.is_empty() {
        reasons.push(Finding::LooksStrong);
    }

    StrengthResult {
        level,
        reasons,
        entropy,
    }
}

/// `log2(charset size) * length` in bits.
pub fn entropy(candidate: &str) -> f64 {
    let mut charset = 0usize;
    if candidate.chars().any(|c| c.is_ascii_lowercase()) {
        charset += 26;
    }
    if candidate.chars().any(|c| c.is_ascii_uppercase()) {
        charset += 26;
    }
    if candidate.chars().any(|c| c.is_ascii_digit()) {
        charset += 10;
    }
    if candidate.chars().any(|c| !c.is_ascii_alphanumeric()) {
        charset += SPECIAL_CHARS.len();
    }

    if charset == 0 {
        return 0.0;
    }
    (charset as f64).log2() * candidate.chars().count() as f64
}

fn matches_common_pattern(candidate: &str) -> bool {
    candidate.chars().all(|c| c.is_ascii_alphabetic())
        || candidate.chars().all(|c| c.is_ascii_digit())
        || candidate.chars().all(|c| c.is_ascii_alphanumeric())
        || has_repeated_run(candidate, 3)
        || DIGIT_RUNS.iter().any(|run| candidate.contains(run))
}

/// Any character repeated `run` or more times in a row.
fn has_repeated_run(candidate: &str, run: usize) -> bool {
    let mut prev = None;
    let mut count = 0;
    for c in candidate.chars() {
        if Some(c) == prev {
            count += 1;
        } else {
            prev = Some(c);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }
    false
}

fn contains_common_word(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    COMMON_WORDS.iter().any(|word| lower.contains(word))
}
