//! Splitting balanced markup into top-level paragraph units.

use crate::model::ParagraphUnit;

use super::tags::{OpenStack, TagCatalog, TagKind};

/// Splits a balanced fragment at paragraph terminators closing at depth zero.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSplitter<'a> {
    catalog: &'a TagCatalog,
}

impl<'a> ParagraphSplitter<'a> {
    /// Create a splitter over the given catalog.
    pub fn new(catalog: &'a TagCatalog) -> Self {
        Self { catalog }
    }

    /// Split `html` into paragraph units.
    ///
    /// Concatenating the units gives back `html` exactly. Text after the last
    /// terminator becomes a final unit, unless it is only whitespace, in which
    /// case it is attached to the previous unit.
    pub fn split(&self, html: &str) -> Vec<ParagraphUnit> {
        let mut units: Vec<ParagraphUnit> = Vec::new();
        let mut stack = OpenStack::new();
        let mut start = 0;

        for token in self.catalog.tokens(html) {
            let matched = stack.apply(&token);
            if matched
                && token.kind == TagKind::Close
                && stack.is_empty()
                && self.catalog.is_terminator(&token.name)
            {
                units.push(ParagraphUnit::new(&html[start..token.end]));
                start = token.end;
            }
        }

        let rest = &html[start..];
        if !rest.is_empty() {
            match units.last_mut() {
                Some(last) if rest.trim().is_empty() => last.0.push_str(rest),
                _ => units.push(ParagraphUnit::new(rest)),
            }
        }

        units
    }

    /// Number of paragraph units in `html`.
    pub fn count(&self, html: &str) -> usize {
        self.split(html).len()
    }

    /// Rightmost byte offset just past a terminator in `html`.
    ///
    /// With `top_level` set, only terminators closing at depth zero count.
    pub fn last_boundary(&self, html: &str, top_level: bool) -> Option<usize> {
        let mut stack = OpenStack::new();
        let mut boundary = None;

        for token in self.catalog.tokens(html) {
            let matched = stack.apply(&token);
            if token.kind != TagKind::Close || !self.catalog.is_terminator(&token.name) {
                continue;
            }
            if !top_level || (matched && stack.is_empty()) {
                boundary = Some(token.end);
            }
        }

        boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(html: &str) -> Vec<String> {
        ParagraphSplitter::new(TagCatalog::standard())
            .split(html)
            .into_iter()
            .map(|u| u.0)
            .collect()
    }

    #[test]
    fn test_split_paragraphs() {
        let units = split("<p>a</p>\n<p>b</p>\n<p>c</p>");
        assert_eq!(units, vec!["<p>a</p>", "\n<p>b</p>", "\n<p>c</p>"]);
    }

    #[test]
    fn test_nested_terminators_do_not_split() {
        let units = split("<div><p>a</p><p>b</p></div><p>c</p>");
        assert_eq!(units, vec!["<div><p>a</p><p>b</p></div>", "<p>c</p>"]);
    }

    #[test]
    fn test_trailing_text_is_a_unit() {
        let units = split("<h2>Title</h2><p>a</p><ul><li>x</li></ul>");
        assert_eq!(units, vec!["<h2>Title</h2><p>a</p>", "<ul><li>x</li></ul>"]);
    }

    #[test]
    fn test_trailing_whitespace_joins_last_unit() {
        let units = split("<p>a</p><p>b</p>\n\n");
        assert_eq!(units, vec!["<p>a</p>", "<p>b</p>\n\n"]);
    }

    #[test]
    fn test_empty_and_plain_text() {
        assert!(split("").is_empty());
        assert_eq!(split("  just text "), vec!["  just text "]);
    }

    #[test]
    fn test_round_trip() {
        let html = "<p>x <b>y</b></p>\n<div>z</div><span>w</span>  \n<p>q</p>tail";
        let joined: String = split(html).concat();
        assert_eq!(joined, html);
    }

    #[test]
    fn test_stray_closer_does_not_split() {
        let units = split("text</p><p>a</p>");
        assert_eq!(units, vec!["text</p><p>a</p>"]);
    }

    #[test]
    fn test_last_boundary() {
        let splitter = ParagraphSplitter::new(TagCatalog::standard());
        let html = "<p>a</p><div><p>b</p>";

        assert_eq!(splitter.last_boundary(html, true), Some(8));
        assert_eq!(splitter.last_boundary(html, false), Some(html.len()));
        assert_eq!(splitter.last_boundary("<span>x</span>", true), None);
    }
}
