//! Multi-line URL assembly.
//!
//! Given a start position, walks forward across lines concatenating text
//! until an end-of-URL boundary is found. Between lines the scanner's
//! continuation judgment decides whether the URL keeps going.

use crate::scanner;

/// A fully assembled candidate URL, before cleaning and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledUrl {
    /// Concatenated URL text across all consumed lines.
    pub text: String,
    /// Index of the line the URL ends on.
    pub end_line: usize,
}

/// Characters allowed inside a URL. Everything else (and whitespace)
/// terminates the match.
pub fn is_url_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '_' | '-'
                | '.'
                | '~'
                | ':'
                | '/'
                | '?'
                | '#'
                | '['
                | ']'
                | '@'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | '%'
                | '{'
                | '}'
                | '|'
                | '\\'
                | '`'
        )
}

/// Byte offset of the first character in `text` that ends a URL, if any:
/// whitespace, or any character outside the allowed URL set.
pub fn find_url_end(text: &str) -> Option<usize> {
    text.char_indices()
        .find(|(_, c)| c.is_whitespace() || !is_url_char(*c))
        .map(|(i, _)| i)
}

/// Assemble the URL starting at (`start_line`, `start_col`), walking across
/// subsequent lines while the scanner judges them valid continuations.
///
/// Returns `None` only for positions that yield no URL text at all; at
/// minimum the start line's remaining text is normally consumed.
pub fn assemble_url(lines: &[String], start_line: usize, start_col: usize) -> Option<AssembledUrl> {
    let first = lines.get(start_line)?;
    if start_col > first.len() || !first.is_char_boundary(start_col) {
        return None;
    }

    let mut url = String::new();
    let mut end_line = start_line;

    for (idx, line) in lines.iter().enumerate().skip(start_line) {
        let candidate: &str = if idx == start_line {
            &line[start_col..]
        } else {
            if !scanner::is_url_continuation(&url, line) {
                break;
            }
            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                break;
            }
            trimmed
        };

        end_line = idx;
        if let Some(boundary) = find_url_end(candidate) {
            url.push_str(&candidate[..boundary]);
            break;
        }
        url.push_str(candidate);
    }

    if url.is_empty() {
        None
    } else {
        Some(AssembledUrl { text: url, end_line })
    }
}
