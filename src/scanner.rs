//! Protocol and continuation detection.
//!
//! Finds where URLs may begin within a line, and judges whether a line
//! continues a URL left incomplete at the end of the previous line. The
//! continuation heuristics are intentionally over-eager: terminal output
//! wraps arbitrarily, so a joined false positive the validator later
//! rejects is cheaper than a missed multi-line URL.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// The schemes the highlighter recognizes, longest first so suffix checks
/// prefer `https://` over `http://`.
pub const PROTOCOLS: [&str; 3] = ["https://", "http://", "file://"];

// Start-of-URL matches anywhere in a single line's text.
static URL_START_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:https?|file)://").unwrap());

// Words that signal prose rather than a URL continuation when they lead the
// next line: grammatical connectives first, adverbial/conjunctive
// connectors second. Approximate and English-specific by nature.
static CONNECTIVE_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "and", "or", "but", "nor", "yet", "the", "a", "an", "is", "are", "was", "were", "be", "been", "being",
        "am", "do", "does", "did", "has", "have", "had", "will", "would", "can", "could", "shall", "should",
        "may", "might", "must", "to", "of", "in", "on", "at", "by", "for", "with", "from", "as", "if", "then",
        "than", "that", "this", "these", "those", "it", "its", "not", "no", "so", "we", "our", "you", "your",
        "they", "them", "their", "he", "him", "his", "she", "her", "i", "my", "me", "us", "who", "whom",
        "whose", "which", "what", "when", "where", "why", "how",
    ]
    .into_iter()
    .collect()
});

static ADVERBIAL_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "however", "therefore", "moreover", "furthermore", "nevertheless", "nonetheless", "meanwhile",
        "otherwise", "consequently", "accordingly", "additionally", "alternatively", "conversely", "similarly",
        "likewise", "instead", "indeed", "thus", "hence", "also", "besides", "anyway", "finally", "eventually",
        "subsequently", "previously", "currently", "ultimately", "essentially", "basically", "generally",
        "typically", "usually", "normally", "certainly", "definitely", "probably", "possibly", "perhaps",
        "maybe", "though", "although", "because", "since", "while", "unless", "until", "regardless",
    ]
    .into_iter()
    .collect()
});

// Everyday English words consulted by the final continuation gate: a
// leading token longer than two characters that is purely alphabetic and
// appears here is treated as prose.
static COMMON_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "about", "above", "after", "again", "against", "all", "almost", "along", "already", "always",
        "another", "any", "anything", "around", "away", "back", "before", "below", "between", "both", "call",
        "came", "come", "copy", "day", "done", "down", "each", "early", "end", "even", "every", "far", "few",
        "file", "find", "first", "found", "get", "give", "good", "got", "great", "hand", "happy", "here",
        "high", "home", "into", "just", "keep", "kind", "know", "large", "last", "late", "left", "less",
        "life", "like", "line", "list", "little", "long", "look", "made", "make", "many", "more", "most",
        "much", "name", "near", "need", "never", "new", "next", "now", "off", "often", "old", "once", "one",
        "only", "open", "other", "out", "over", "own", "part", "place", "point", "put", "read", "right",
        "run", "said", "same", "saw", "say", "see", "seen", "set", "show", "side", "small", "some", "soon",
        "still", "such", "sure", "take", "tell", "test", "text", "thing", "think", "three", "time", "today",
        "together", "too", "took", "two", "under", "upon", "use", "used", "very", "want", "way", "week",
        "well", "went", "word", "words", "work", "world", "year", "years",
    ]
    .into_iter()
    .collect()
});

/// Byte columns where a URL may begin within `line`.
pub fn url_start_columns(line: &str) -> Vec<usize> {
    URL_START_PATTERN.find_iter(line).map(|m| m.start()).collect()
}

/// The complete protocol string `line` ends with, if any.
pub fn trailing_complete_protocol(line: &str) -> Option<&'static str> {
    PROTOCOLS.iter().copied().find(|p| line.ends_with(p))
}

/// The trailing whitespace-delimited token of `line`, when that whole token
/// is a proper prefix of one of the recognized protocols (`h`, `ht`, ...,
/// `https:/`). Anchoring on the token keeps `light` from matching via its
/// `ht` suffix.
pub fn trailing_partial_protocol(line: &str) -> Option<&str> {
    let start = line
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_whitespace())
        .last()
        .map(|(i, _)| i)?;
    let token = &line[start..];
    if is_partial_protocol(token) { Some(token) } else { None }
}

/// Whether `token` is a non-empty proper prefix of a recognized protocol.
pub fn is_partial_protocol(token: &str) -> bool {
    !token.is_empty() && PROTOCOLS.iter().any(|p| p.len() > token.len() && p.starts_with(token))
}

/// Whether `next_line` can extend the partial protocol `partial` toward one
/// of the full protocol strings.
pub fn partial_protocol_extends(partial: &str, next_line: &str) -> bool {
    let trimmed = next_line.trim_start();
    if trimmed.is_empty() {
        return false;
    }
    let mut combined = String::with_capacity(partial.len() + 8);
    combined.push_str(partial);
    combined.push_str(trimmed);
    if PROTOCOLS.iter().any(|p| combined.starts_with(p) || p.starts_with(combined.as_str())) {
        return true;
    }
    // A token like `https:/` may run straight into the host on the next line.
    partial.ends_with('/') && starts_with_domain_char(trimmed)
}

/// Whether `text`, after stripping leading whitespace, begins with a
/// character valid at the start of a domain.
pub fn starts_with_domain_char(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '[' | ']' | '.' | '-'))
}

/// Continuation judgment for a URL that already contains `://`.
///
/// The checks run in order: empty lines, prose connectives, leading
/// punctuation, and a sentence-ending period all reject; a leading token
/// containing URL structure accepts; anything left is accepted unless it is
/// a long purely-alphabetic everyday word.
pub fn is_established_continuation(next_line: &str) -> bool {
    let trimmed = next_line.trim_start();
    if trimmed.is_empty() {
        return false;
    }
    let Some(token) = trimmed.split_whitespace().next() else {
        return false;
    };
    let word = token.trim_end_matches(['.', ',', ';', ':', '!', '?']).to_lowercase();
    if CONNECTIVE_WORDS.contains(word.as_str()) || ADVERBIAL_WORDS.contains(word.as_str()) {
        return false;
    }
    if trimmed.starts_with(['!', '?', ';']) {
        return false;
    }
    // A lone period is a sentence ending, not a path segment.
    if trimmed.starts_with('.') && trimmed[1..].chars().next().is_none_or(|c| c.is_whitespace()) {
        return false;
    }
    if token.chars().any(|c| matches!(c, '/' | ':' | '.' | '_' | '-')) {
        return true;
    }
    if token.chars().count() > 2 && token.chars().all(char::is_alphabetic) && COMMON_WORDS.contains(word.as_str())
    {
        return false;
    }
    true
}

/// Whether `next_line` plausibly continues the URL text accumulated so far.
pub fn is_url_continuation(accumulated: &str, next_line: &str) -> bool {
    if PROTOCOLS.iter().any(|p| *p == accumulated) {
        return starts_with_domain_char(next_line);
    }
    if is_partial_protocol(accumulated) {
        return partial_protocol_extends(accumulated, next_line);
    }
    if accumulated.contains("://") {
        return is_established_continuation(next_line);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_start_columns() {
        assert_eq!(url_start_columns("Visit https://example.com now"), vec![6]);
        assert_eq!(url_start_columns("http://a file://b"), vec![0, 9]);
        assert_eq!(url_start_columns("no urls here"), Vec::<usize>::new());
        // A bare scheme-ish colon without slashes is not a start.
        assert_eq!(url_start_columns("Protocol: https:"), Vec::<usize>::new());
    }

    #[test]
    fn test_trailing_complete_protocol() {
        assert_eq!(trailing_complete_protocol("Visit https://"), Some("https://"));
        assert_eq!(trailing_complete_protocol("see file://"), Some("file://"));
        assert_eq!(trailing_complete_protocol("Visit https://e"), None);
        assert_eq!(trailing_complete_protocol(""), None);
    }

    #[test]
    fn test_trailing_partial_protocol_requires_token_boundary() {
        assert_eq!(trailing_partial_protocol("Visit ht"), Some("ht"));
        assert_eq!(trailing_partial_protocol("Visit https:/"), Some("https:/"));
        assert_eq!(trailing_partial_protocol("Protocol: https:"), Some("https:"));
        // Suffix of a longer word does not count.
        assert_eq!(trailing_partial_protocol("bright light"), None);
        // Full protocol is not a partial.
        assert_eq!(trailing_partial_protocol("Visit https://"), None);
        // Line ending in whitespace has no trailing token.
        assert_eq!(trailing_partial_protocol("Visit ht "), None);
    }

    #[test]
    fn test_partial_protocol_extends() {
        assert!(partial_protocol_extends("ht", "tps://example.com"));
        assert!(partial_protocol_extends("https:", "//example.com"));
        // Next line shorter than the remainder still counts as plausible.
        assert!(partial_protocol_extends("htt", "p"));
        // `https:` + `/etc/passwd` yields a single slash, not a protocol.
        assert!(!partial_protocol_extends("https:", "/etc/passwd is a file"));
        // Token ending in `/` may run into the host directly.
        assert!(partial_protocol_extends("https:/", "example.com"));
        assert!(!partial_protocol_extends("ht", "not a protocol"));
        assert!(!partial_protocol_extends("ht", "   "));
    }

    #[test]
    fn test_established_continuation_rejects_prose() {
        assert!(!is_established_continuation(""));
        assert!(!is_established_continuation("   "));
        assert!(!is_established_continuation("and then we left"));
        assert!(!is_established_continuation("The server restarted"));
        assert!(!is_established_continuation("however, it failed"));
        assert!(!is_established_continuation("! important"));
        assert!(!is_established_continuation("? maybe"));
        assert!(!is_established_continuation("; separated"));
        assert!(!is_established_continuation(". And a new sentence"));
        assert!(!is_established_continuation("."));
        assert!(!is_established_continuation("here it is"));
    }

    #[test]
    fn test_established_continuation_accepts_url_structure() {
        assert!(is_established_continuation("path/to/resource"));
        assert!(is_established_continuation("example.com/path"));
        assert!(is_established_continuation(".com/trailing"));
        assert!(is_established_continuation("snake_case"));
        assert!(is_established_continuation("a-b"));
        assert!(is_established_continuation(":8080/metrics"));
        // Short or unlisted alphabetic tokens pass through to the validator.
        assert!(is_established_continuation("io"));
        assert!(is_established_continuation("xyzzy"));
    }

    #[test]
    fn test_is_url_continuation_dispatch() {
        // Complete protocol: next line must start with a domain character.
        assert!(is_url_continuation("https://", "example.com"));
        assert!(is_url_continuation("https://", "  [::1]:8080"));
        assert!(!is_url_continuation("https://", "  (parens)"));
        // Partial protocol: plausible-extension check.
        assert!(is_url_continuation("ht", "tps://example.com"));
        assert!(!is_url_continuation("https:", "/etc/passwd is a file"));
        // Established URL: prose heuristics.
        assert!(is_url_continuation("https://example", ".com/path"));
        assert!(!is_url_continuation("https://example.com", "and more text"));
        // Anything else is not a URL fragment at all.
        assert!(!is_url_continuation("plain text", "more text"));
    }
}
