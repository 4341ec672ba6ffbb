//! Random password and passphrase generation.
//!
//! All randomness comes from `OsRng`.

use super::strength::SPECIAL_CHARS;
use rand::{rngs::OsRng, seq::SliceRandom, Rng};

pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// One character per class is always placed
const MIN_PASSWORD_LENGTH: usize = 4;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

const ADJECTIVES: &[&str] = &["secure", "hidden", "random", "epic", "magic"];
const NOUNS: &[&str] = &["dragon", "phoenix", "ocean", "forest", "castle"];
const VERBS: &[&str] = &["protect", "defend", "create", "discover"];

const PASSPHRASE_SEPARATOR: &str = "-";

fn pick<T: Copy>(rng: &mut OsRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Random password with at least one upper, lower, digit and special char.
///
/// Lengths below 4 are raised to 4.
pub fn generate_password(length: usize) -> String {
    let mut rng = OsRng;
    let length = length.max(MIN_PASSWORD_LENGTH);
    let specials = SPECIAL_CHARS.as_bytes();

    let mut chars = Vec::with_capacity(length);
    chars.push(pick(&mut rng, UPPERCASE));
    chars.push(pick(&mut rng, LOWERCASE));
    chars.push(pick(&mut rng, DIGITS));
    chars.push(pick(&mut rng, specials));

    let all: Vec<u8> = [UPPERCASE, LOWERCASE, DIGITS, specials].concat();
    while chars.len() < length {
        chars.push(pick(&mut rng, &all));
    }

    // Fisher-Yates, so the guaranteed classes are not always up front
    chars.shuffle(&mut rng);
    chars.into_iter().map(char::from).collect()
}

/// `adjective-noun-verb-NN[-special]`, special included half the time.
pub fn generate_passphrase() -> String {
    let mut rng = OsRng;

    let mut parts = vec![
        pick(&mut rng, ADJECTIVES).to_string(),
        pick(&mut rng, NOUNS).to_string(),
        pick(&mut rng, VERBS).to_string(),
        rng.gen_range(10..=99).to_string(),
    ];
    if rng.gen_bool(0.5) {
        parts.push(char::from(pick(&mut rng, SPECIAL_CHARS.as_bytes())).to_string());
    }

    parts.join(PASSPHRASE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_all_classes(password: &str) -> bool {
        password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| SPECIAL_CHARS.contains(c))
    }

    #[test]
    fn test_default_length_and_classes() {
        for _ in 0..1_000 {
            let password = generate_password(DEFAULT_PASSWORD_LENGTH);
            assert_eq!(password.len(), DEFAULT_PASSWORD_LENGTH);
            assert!(has_all_classes(&password), "missing class in {}", password);
        }
    }

    #[test]
    fn test_short_length_raised() {
        let password = generate_password(1);
        assert_eq!(password.len(), MIN_PASSWORD_LENGTH);
        assert!(has_all_classes(&password));
    }

    #[test]
    fn test_only_known_characters() {
        let password = generate_password(64);
        assert!(password
            .bytes()
            .all(|b| UPPERCASE.contains(&b)
                || LOWERCASE.contains(&b)
                || DIGITS.contains(&b)
                || SPECIAL_CHARS.as_bytes().contains(&b)));
    }

    #[test]
    fn test_class_position_varies() {
        // With a fixed order the first char would always be uppercase
        let upper_first = (0..200)
            .filter(|_| {
                generate_password(16)
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_uppercase())
            })
            .count();
        assert!(upper_first < 200);
    }

    #[test]
    fn test_passphrase_shape() {
        for _ in 0..200 {
            let phrase = generate_passphrase();
            // Special char may itself be '-', so split on the first four parts only
            let parts: Vec<&str> = phrase.splitn(5, PASSPHRASE_SEPARATOR).collect();
            assert!(parts.len() == 4 || parts.len() == 5, "{}", phrase);
            assert!(ADJECTIVES.contains(&parts[0]));
            assert!(NOUNS.contains(&parts[1]));
            assert!(VERBS.contains(&parts[2]));
            let number: u32 = parts[3].parse().expect("two-digit number");
            assert!((10..=99).contains(&number));
            if let Some(special) = parts.get(4) {
                assert_eq!(special.len(), 1);
                assert!(SPECIAL_CHARS.contains(special));
            }
        }
    }

    #[test]
    fn test_passphrase_special_is_optional() {
        let with_special = (0..400)
            .filter(|_| generate_passphrase().splitn(5, '-').count() == 5)
            .count();
        assert!(with_special > 0 && with_special < 400);
    }
}
