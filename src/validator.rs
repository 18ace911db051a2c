//! URL cleaning and validation.
//!
//! The scanner and assembler are deliberately over-eager; this module is
//! the gate that turns raw assembled text into a link-worthy URL or
//! discards it. No step here can fail loudly: a candidate either validates
//! or it was never a URL.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Shortest cleaned URL worth linking (`file://` is 7 characters).
pub const MIN_URL_LENGTH: usize = 7;

/// Longest cleaned URL worth linking.
pub const MAX_URL_LENGTH: usize = 2048;

// Structural allow-pattern. Bare single-word hosts (`http://something`) are
// rejected unless they are localhost, numeric, or bracketed; this keeps
// colon-slash-slash sequences in ordinary terminal text from linking.
static URL_SHAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^https?://
        (?:
            localhost
          | \d{1,3}(?:\.\d{1,3}){3}        # IPv4-like
          | \[[0-9A-Fa-f:.]+\]             # bracketed IPv6-like
          | [^\s/:?\#]+\.[^\s/:?\#]+       # any host containing a dot
        )
        (?::\d+)?                          # optional port
        (?:[/?\#]\S*)?                     # arbitrary trailing path
        $
      | ^file://.+$
        ",
    )
    .unwrap()
});

/// A candidate that survived validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUrl {
    /// Cleaned URL text, byte-for-byte as it appears across the scanned
    /// lines. Span arithmetic works on this.
    pub text: String,
    /// Normalized serialization of the parsed URL, used for `href`.
    pub href: String,
}

/// Strip trailing punctuation that is almost never part of a URL: excess
/// closing parentheses first (balanced ones stay), then a trailing
/// punctuation run.
pub fn clean_url(raw: &str) -> String {
    let mut cleaned = raw;
    let open = cleaned.matches('(').count();
    let close = cleaned.matches(')').count();
    let mut excess = close.saturating_sub(open);
    while excess > 0 && cleaned.ends_with(')') {
        cleaned = &cleaned[..cleaned.len() - 1];
        excess -= 1;
    }
    cleaned.trim_end_matches(['.', ',', ';', ':', '!', '?']).to_string()
}

/// Clean and validate with the default length bounds.
pub fn validate(raw: &str) -> Option<ValidUrl> {
    validate_with_limits(raw, MIN_URL_LENGTH, MAX_URL_LENGTH)
}

/// Clean `raw` and check every validity rule: length bounds, control
/// characters, structural shape, and a final parse restricted to the
/// http/https/file schemes. A parse failure is a validation failure, never
/// an error.
pub fn validate_with_limits(raw: &str, min_len: usize, max_len: usize) -> Option<ValidUrl> {
    let cleaned = clean_url(raw);
    let len = cleaned.chars().count();
    if len < min_len || len > max_len {
        return None;
    }
    if cleaned.contains(['\n', '\r', '\t']) {
        return None;
    }
    if !URL_SHAPE_PATTERN.is_match(&cleaned) {
        return None;
    }
    let parsed = Url::parse(&cleaned).ok()?;
    if !matches!(parsed.scheme(), "http" | "https" | "file") {
        return None;
    }
    Some(ValidUrl {
        href: parsed.to_string(),
        text: cleaned,
    })
}
