//! Maps logical column ranges back onto physical text nodes and wraps the
//! covered text in anchor elements.
//!
//! A line's flattened text may be fragmented across many text nodes inside
//! nested styling elements. The walk snapshots every text node with its
//! cumulative offsets, then applies splits in reverse document order so
//! earlier offsets stay valid while the tree is mutated. Text already
//! inside an anchor carrying the marker class is skipped, which is what
//! makes repeated scans idempotent.

use std::ops::Range;

use crate::config::HighlightConfig;
use crate::tree::{Element, Node};

/// A text node located during the segment walk: its child-index path from
/// the line element and its [start, end) byte offsets within the line's
/// flattened text.
#[derive(Debug, Clone)]
struct TextSegment {
    path: Vec<usize>,
    start: usize,
    end: usize,
    inside_link: bool,
}

/// Wrap the byte range `range` of `line`'s flattened text in anchors
/// pointing at `href`. One anchor is created per overlapping text node;
/// non-matching text and existing structure are left untouched. Structural
/// anomalies (nothing overlaps, stale offsets) result in a no-op.
pub fn wrap_range(line: &mut Element, range: Range<usize>, href: &str, config: &HighlightConfig) {
    if range.is_empty() {
        return;
    }

    let mut segments = Vec::new();
    let mut path = Vec::new();
    let mut offset = 0;
    collect_segments(line, &mut path, &mut offset, false, &config.link_class, &mut segments);

    for seg in segments.iter().rev() {
        if seg.inside_link {
            continue;
        }
        let lo = range.start.max(seg.start);
        let hi = range.end.min(seg.end);
        if lo >= hi {
            continue;
        }
        split_and_wrap(line, seg, lo - seg.start, hi - seg.start, href, config);
    }
}

fn collect_segments(
    el: &Element,
    path: &mut Vec<usize>,
    offset: &mut usize,
    inside_link: bool,
    link_class: &str,
    out: &mut Vec<TextSegment>,
) {
    for (i, child) in el.children.iter().enumerate() {
        path.push(i);
        match child {
            Node::Text(t) => {
                out.push(TextSegment {
                    path: path.clone(),
                    start: *offset,
                    end: *offset + t.len(),
                    inside_link,
                });
                *offset += t.len();
            }
            Node::Element(e) => {
                let nested = inside_link || (e.tag == "a" && e.has_class(link_class));
                collect_segments(e, path, offset, nested, link_class, out);
            }
        }
        path.pop();
    }
}

/// Split the text node at `seg.path` into before / anchor / after pieces
/// covering the node-local byte range [local_start, local_end).
fn split_and_wrap(
    line: &mut Element,
    seg: &TextSegment,
    local_start: usize,
    local_end: usize,
    href: &str,
    config: &HighlightConfig,
) {
    let Some((parent, idx)) = parent_of(line, &seg.path) else {
        return;
    };
    let Some(Node::Text(text)) = parent.children.get(idx) else {
        return;
    };
    if local_end > text.len()
        || local_start >= local_end
        || !text.is_char_boundary(local_start)
        || !text.is_char_boundary(local_end)
    {
        return;
    }
    let text = text.clone();
    let before = &text[..local_start];
    let matched = &text[local_start..local_end];
    let after = &text[local_end..];

    let mut replacement = Vec::with_capacity(3);
    if !before.is_empty() {
        replacement.push(Node::text(before));
    }
    replacement.push(make_anchor(matched, href, config));
    if !after.is_empty() {
        replacement.push(Node::text(after));
    }
    parent.children.splice(idx..idx + 1, replacement);
}

/// Resolve the parent element of the node at `path`, plus the node's index
/// within it. Returns `None` when the path no longer matches the tree.
fn parent_of<'a>(line: &'a mut Element, path: &[usize]) -> Option<(&'a mut Element, usize)> {
    let (&idx, ancestors) = path.split_last()?;
    let mut current = line;
    for &i in ancestors {
        match current.children.get_mut(i)? {
            Node::Element(e) => current = e,
            Node::Text(_) => return None,
        }
    }
    if idx < current.children.len() {
        Some((current, idx))
    } else {
        None
    }
}

fn make_anchor(text: &str, href: &str, config: &HighlightConfig) -> Node {
    let mut anchor = Element::with_class("a", config.link_class.as_str());
    anchor.set_attr("href", href);
    if config.open_in_new_tab {
        anchor.set_attr("target", "_blank");
        anchor.set_attr("rel", "noopener noreferrer");
    }
    if !config.link_style.is_empty() {
        anchor.set_attr("style", config.link_style.as_str());
    }
    anchor.push_text(text);
    Node::Element(anchor)
}
