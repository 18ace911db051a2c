//! Processed-range bookkeeping.
//!
//! One `ProcessedRanges` lives for the duration of a single scan pass and
//! records, per line, the column ranges already converted to links so a
//! later candidate cannot double-wrap them. `line_spans` is the single
//! routine that walks a cleaned URL's length across lines; the tracker and
//! the rewriter both consume its output, so the two cannot disagree about
//! where a URL starts and ends on each line.

use std::collections::HashMap;
use std::ops::Range;

use crate::assembler;

/// Per-line record of byte ranges already linked during this scan pass.
/// Ranges only accumulate; nothing is ever removed.
#[derive(Debug, Default)]
pub struct ProcessedRanges {
    ranges: HashMap<usize, Vec<Range<usize>>>,
}

impl ProcessedRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether byte column `col` on `line` falls inside an already-linked range.
    pub fn is_processed(&self, line: usize, col: usize) -> bool {
        self.ranges
            .get(&line)
            .is_some_and(|ranges| ranges.iter().any(|r| r.contains(&col)))
    }

    /// Record a linked range. Empty ranges are ignored.
    pub fn mark(&mut self, line: usize, range: Range<usize>) {
        if !range.is_empty() {
            self.ranges.entry(line).or_default().push(range);
        }
    }
}

/// One line's share of a highlighted URL.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpan {
    pub line: usize,
    /// Byte range of the line's flattened text covered by the URL.
    pub range: Range<usize>,
}

/// Distribute `url_len` bytes of cleaned URL text across lines.
///
/// The first line starts at the explicit `start_col`; subsequent lines skip
/// leading whitespace. Each line consumes the lesser of its available text
/// and the remaining URL length, truncated further at any URL-terminating
/// character within that window.
pub fn line_spans(lines: &[String], start_line: usize, start_col: usize, url_len: usize) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut remaining = url_len;
    let mut line_idx = start_line;

    while remaining > 0 && line_idx < lines.len() {
        let text = lines[line_idx].as_str();
        let start = if line_idx == start_line {
            start_col
        } else {
            text.len() - text.trim_start().len()
        };
        if start >= text.len() || !text.is_char_boundary(start) {
            break;
        }

        let avail = &text[start..];
        let mut take = floor_char_boundary(avail, remaining.min(avail.len()));
        let boundary = assembler::find_url_end(&avail[..take]);
        if let Some(b) = boundary {
            take = b;
        }
        if take > 0 {
            remaining -= take;
            spans.push(LineSpan {
                line: line_idx,
                range: start..start + take,
            });
        }
        if boundary.is_some() || take == 0 {
            break;
        }
        line_idx += 1;
    }

    spans
}

/// Largest char-boundary index of `s` not exceeding `idx`.
fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
