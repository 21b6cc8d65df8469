//! Syntax check for URLs submitted for shortening.

use url::Url;

/// Returns true if `raw` parses as an absolute URI.
///
/// Only syntax is checked: the target is never contacted, and the URL is
/// stored exactly as submitted. Relative references, blank input and
/// surrounding whitespace are rejected.
pub fn is_valid_url(raw: &str) -> bool {
    if raw.is_empty() || raw.trim() != raw {
        return false;
    }

    Url::parse(raw).is_ok()
}
