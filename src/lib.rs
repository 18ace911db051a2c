//! linkwrap: a multi-line URL highlighter for wrapped terminal output.
//!
//! Terminal renderers wrap long output across visual lines and fragment a
//! line's text across styled elements, so a single URL may be split over
//! several lines and several text nodes. `process_links` scans a container
//! of line elements, reassembles such URLs, validates them, and rewrites
//! exactly the covered text into anchor elements, idempotently and without
//! disturbing surrounding structure.
//!
//! ```
//! use linkwrap_lib::tree::Container;
//!
//! let mut container = Container::from_lines(["Visit https://", "example.com/docs today"]);
//! linkwrap_lib::process_links(&mut container);
//! assert!(container.to_html().contains("href=\"https://example.com/docs\""));
//! ```

pub mod assembler;
pub mod config;
pub mod rewriter;
pub mod scanner;
pub mod tracker;
pub mod tree;
pub mod validator;

pub use config::HighlightConfig;
pub use tree::{Container, Element, Node};

use tracker::ProcessedRanges;

/// The highlighting engine. Holds the configuration; one instance can scan
/// any number of containers, and a single scan is a complete synchronous
/// pass with no error path.
#[derive(Debug, Clone, Default)]
pub struct UrlHighlighter {
    config: HighlightConfig,
}

impl UrlHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: HighlightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Scan every line of `container` and rewrite matched URL text into
    /// anchor elements in place.
    ///
    /// For each line in document order: first check whether it continues a
    /// URL left incomplete at the end of the previous line (complete or
    /// partial protocol at the boundary), then scan the line itself for new
    /// URL starts. Each candidate runs the same pipeline: processed-range
    /// check, assembly, validation, rewrite, mark processed. Repeated calls
    /// are idempotent; already-linked text is detected in the tree itself.
    pub fn process_links(&self, container: &mut Container) {
        let texts = container.line_texts(&self.config.line_class);

        let mut processed = ProcessedRanges::new();
        for idx in 0..texts.len() {
            if idx > 0 {
                let prev = texts[idx - 1].as_str();
                if let Some(protocol) = scanner::trailing_complete_protocol(prev) {
                    if scanner::starts_with_domain_char(&texts[idx]) {
                        let col = prev.len() - protocol.len();
                        self.try_highlight(container, &texts, &mut processed, idx - 1, col);
                    }
                } else if let Some(partial) = scanner::trailing_partial_protocol(prev) {
                    if scanner::partial_protocol_extends(partial, &texts[idx]) {
                        let col = prev.len() - partial.len();
                        self.try_highlight(container, &texts, &mut processed, idx - 1, col);
                    }
                }
            }

            for col in scanner::url_start_columns(&texts[idx]) {
                self.try_highlight(container, &texts, &mut processed, idx, col);
            }
        }
    }

    /// Run one candidate through assemble -> validate -> rewrite -> mark.
    /// Every failure mode is a silent discard.
    fn try_highlight(
        &self,
        container: &mut Container,
        texts: &[String],
        processed: &mut ProcessedRanges,
        start_line: usize,
        start_col: usize,
    ) {
        if processed.is_processed(start_line, start_col) {
            return;
        }

        let Some(candidate) = assembler::assemble_url(texts, start_line, start_col) else {
            return;
        };
        let Some(valid) =
            validator::validate_with_limits(&candidate.text, self.config.min_url_length, self.config.max_url_length)
        else {
            log::debug!(
                "discarded candidate at line {start_line} col {start_col}: {:?}",
                candidate.text
            );
            return;
        };

        let spans = tracker::line_spans(texts, start_line, start_col, valid.text.len());
        if spans.iter().any(|s| processed.is_processed(s.line, s.range.start)) {
            return;
        }

        for span in &spans {
            if let Some(line) = container.line_mut(&self.config.line_class, span.line) {
                rewriter::wrap_range(line, span.range.clone(), &valid.href, &self.config);
            }
        }
        log::debug!(
            "linked {} across lines {}..={}",
            valid.href,
            start_line,
            candidate.end_line
        );
        for span in spans {
            processed.mark(span.line, span.range);
        }
    }
}

/// Scan `container` with default settings. See [`UrlHighlighter::process_links`].
pub fn process_links(container: &mut Container) {
    UrlHighlighter::new().process_links(container);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{LINE_CLASS, LINK_CLASS};

    fn anchor_count(container: &Container) -> usize {
        fn walk(el: &Element, count: &mut usize) {
            for child in &el.children {
                if let Node::Element(e) = child {
                    if e.tag == "a" && e.has_class(LINK_CLASS) {
                        *count += 1;
                    }
                    walk(e, count);
                }
            }
        }
        let mut count = 0;
        walk(&container.root, &mut count);
        count
    }

    #[test]
    fn test_process_links_basic() {
        let mut container = Container::from_lines(["Visit https://example.com for more info"]);
        process_links(&mut container);
        assert_eq!(anchor_count(&container), 1);
        assert_eq!(
            container.line_texts(LINE_CLASS),
            vec!["Visit https://example.com for more info".to_string()]
        );
    }

    #[test]
    fn test_process_links_respects_custom_classes() {
        let highlighter = UrlHighlighter::from_config(HighlightConfig {
            line_class: "row".to_string(),
            link_class: "hyperlink".to_string(),
            ..HighlightConfig::default()
        });

        let mut root = Element::new("div");
        let mut line = Element::with_class("div", "row");
        line.push_text("see https://example.com");
        root.push_child(Node::Element(line));
        let mut container = Container::new(root);

        highlighter.process_links(&mut container);
        assert!(container.to_html().contains("class=\"hyperlink\""));
    }

    #[test]
    fn test_no_urls_leaves_container_untouched() {
        let mut container = Container::from_lines(["plain text", "more plain text"]);
        let snapshot = container.clone();
        process_links(&mut container);
        assert_eq!(container, snapshot);
    }
}
