//! Syntactic rules for caller-supplied short codes.

use regex::Regex;
use std::sync::LazyLock;

/// Minimum accepted code length.
pub const MIN_CODE_LENGTH: usize = 3;

/// Maximum accepted code length.
pub const MAX_CODE_LENGTH: usize = 32;

/// Compiled pattern for caller-supplied codes.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("code pattern is valid"));

/// Returns true if `code` may be used as a short code.
///
/// A code is valid iff its length is within `[3, 32]` and every character is
/// an ASCII letter, an ASCII digit, `-` or `_`. There is no reserved-word list
/// and no case folding.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length_bounds() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("ab"));
        assert!(is_valid_code("abc"));
        assert!(is_valid_code(&"a".repeat(32)));
        assert!(!is_valid_code(&"a".repeat(33)));
    }

    #[test]
    fn test_validate_allowed_characters() {
        assert!(is_valid_code("My-Code_2024"));
        assert!(is_valid_code("___"));
        assert!(is_valid_code("---"));
        assert!(is_valid_code("ABC"));
    }

    #[test]
    fn test_validate_rejects_other_characters() {
        assert!(!is_valid_code("my code"));
        assert!(!is_valid_code("my.code"));
        assert!(!is_valid_code("my/code"));
        assert!(!is_valid_code("code@123"));
        assert!(!is_valid_code("ĉodé"));
    }

    #[test]
    fn test_pattern_bounds_match_constants() {
        assert!(is_valid_code(&"a".repeat(MIN_CODE_LENGTH)));
        assert!(!is_valid_code(&"a".repeat(MIN_CODE_LENGTH - 1)));
        assert!(is_valid_code(&"a".repeat(MAX_CODE_LENGTH)));
        assert!(!is_valid_code(&"a".repeat(MAX_CODE_LENGTH + 1)));
    }

    #[test]
    fn test_validate_rejects_trailing_newline() {
        assert!(!is_valid_code("abc\n"));
        assert!(!is_valid_code("\nabc"));
    }

    #[test]
    fn test_validate_has_no_reserved_words() {
        assert!(is_valid_code("users"));
        assert!(is_valid_code("health"));
    }
}
