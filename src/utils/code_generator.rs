//! Short code generation.
//!
//! Candidates are drawn from an alphabet without look-alike glyphs using the
//! thread-local CSPRNG, so codes cannot be predicted from earlier ones.
//! Uniqueness is not checked here; the store's constraint on `short_code`
//! decides, and callers retry with a fresh candidate on conflict.

use rand::Rng;

/// Digits and ASCII letters minus `0`, `O`, `1`, `I` and `l`.
pub const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates a random short code of exactly `length` symbols.
///
/// Each symbol is sampled independently and uniformly from [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::code_validator::is_valid_code;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_no_ambiguous_characters() {
        for c in [b'0', b'O', b'1', b'I', b'l'] {
            assert!(!ALPHABET.contains(&c), "{} must not be used", c as char);
        }
        assert_eq!(ALPHABET.len(), 57);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len());
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(DEFAULT_CODE_LENGTH).len(), DEFAULT_CODE_LENGTH);
        assert_eq!(generate_code(3).len(), 3);
        assert_eq!(generate_code(32).len(), 32);
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..100 {
            assert!(is_valid_code(&generate_code(DEFAULT_CODE_LENGTH)));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code(12)).collect();
        assert_eq!(codes.len(), 1000);
    }
}
