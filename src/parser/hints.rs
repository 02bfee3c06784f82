//! Hidden alignment-hint blocks.
//!
//! A local page may carry a block such as
//!
//! ```text
//! <div class="bilingual-hints" data-lang="fr" style="display:none"><pre>
//! History = Histoire
//! Geography = Géographie
//! </pre></div>
//! ```
//!
//! Each `key = value` line names a phrase of the local page (`key`) and its
//! counterpart in the foreign page (`value`). The block is removed from the
//! output and every key becomes a [`Marker`] in front of its first
//! occurrence.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{AlignmentHint, Marker};

use super::options::DEFAULT_HINT_CLASS;

fn div_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<div\b[^>]*>").expect("valid div pattern"))
}

fn div_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<(/?)div\b[^>]*>").expect("valid div tag pattern"))
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)([a-z][a-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("valid attribute pattern")
    })
}

fn pre_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</?pre\b[^>]*>").expect("valid pre pattern"))
}

/// A local document with its hint block consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintedDocument {
    /// Markup with every hint block removed
    pub html: String,

    /// Entries of the block matching the requested language
    pub hints: Vec<AlignmentHint>,

    /// Located hints, sorted by offset into `html`
    pub markers: Vec<Marker>,
}

/// A hint block found in markup.
#[derive(Debug, Clone)]
struct HintBlock<'a> {
    range: Range<usize>,
    language: Option<String>,
    body: &'a str,
}

/// Parser for hidden hint blocks.
#[derive(Debug, Clone)]
pub struct AlignmentHintParser {
    class: String,
}

impl AlignmentHintParser {
    /// Create a parser for blocks carrying the given class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    /// Remove the hint blocks and place markers for `language_code`.
    pub fn parse(&self, html: &str, language_code: &str) -> HintedDocument {
        let (html, hints) = self.extract(html, language_code);
        let markers = place_markers(&html, &hints);
        HintedDocument {
            html,
            hints,
            markers,
        }
    }

    /// Remove every hint block and return the entries of the first block
    /// keyed by `language_code`.
    ///
    /// A missing block is not an error; the hint list is simply empty.
    pub fn extract(&self, html: &str, language_code: &str) -> (String, Vec<AlignmentHint>) {
        let blocks = self.find_blocks(html);
        let mut matching = blocks.iter().filter(|b| {
            b.language
                .as_deref()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(language_code))
        });

        let hints = match matching.next() {
            Some(block) => parse_hint_body(block.body),
            None => Vec::new(),
        };
        if matching.next().is_some() {
            log::debug!(
                "Several hint blocks for '{}', using the first one",
                language_code
            );
        }

        (remove_ranges(html, blocks.iter().map(|b| b.range.clone())), hints)
    }

    /// Remove every hint block, whatever its language.
    pub fn strip(&self, html: &str) -> String {
        let blocks = self.find_blocks(html);
        if blocks.is_empty() {
            return html.to_string();
        }
        remove_ranges(html, blocks.into_iter().map(|b| b.range))
    }

    fn find_blocks<'a>(&self, html: &'a str) -> Vec<HintBlock<'a>> {
        let mut blocks = Vec::new();
        let mut pos = 0;

        while let Some(open) = div_open_regex().find_at(html, pos) {
            pos = open.end();
            let Some(attrs) = self.hint_attributes(open.as_str()) else {
                continue;
            };
            let Some(close) = matching_div_close(html, open.end()) else {
                log::warn!("Hint block at byte {} is never closed", open.start());
                break;
            };
            blocks.push(HintBlock {
                range: open.start()..close.end,
                language: attrs,
                body: &html[open.end()..close.start],
            });
            pos = close.end;
        }

        blocks
    }

    /// Returns `Some(data-lang)` when the opening tag is a hint block.
    fn hint_attributes(&self, tag: &str) -> Option<Option<String>> {
        let mut is_hint = false;
        let mut language = None;

        for caps in attr_regex().captures_iter(tag) {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();

            if name.eq_ignore_ascii_case("class") {
                is_hint = value.split_whitespace().any(|c| c == self.class);
            } else if name.eq_ignore_ascii_case("data-lang") {
                language = Some(value.trim().to_string());
            }
        }

        is_hint.then_some(language)
    }
}

impl Default for AlignmentHintParser {
    fn default() -> Self {
        Self::new(DEFAULT_HINT_CLASS)
    }
}

/// Parse `key = value` lines. Lines without `=` or with an empty key are
/// ignored; `<pre>` tags are dropped first and inner `<div>` tags end a line.
pub fn parse_hint_body(body: &str) -> Vec<AlignmentHint> {
    let body = pre_regex().replace_all(body, "");
    let body = div_tag_regex().replace_all(&body, "\n");
    let mut hints = Vec::new();

    for line in body.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        hints.push(AlignmentHint::new(hints.len() as u32, key, value.trim()));
    }

    hints
}

/// Locate each hint's first free occurrence in text content.
///
/// An occurrence is consumed by the first hint bound to it, so a key listed
/// twice binds to its first two occurrences. Hints left without an
/// occurrence are dropped. The result is sorted by offset and ordinals follow
/// that order.
pub fn place_markers(html: &str, hints: &[AlignmentHint]) -> Vec<Marker> {
    let mut located: Vec<(usize, &AlignmentHint)> = Vec::with_capacity(hints.len());

    for hint in hints {
        let mut from = 0;
        let found = loop {
            match find_in_text(html, &hint.anchor_text, from) {
                Some(offset) if located.iter().any(|(o, _)| *o == offset) => {
                    from = offset + hint.anchor_text.len();
                }
                other => break other,
            }
        };
        match found {
            Some(offset) => located.push((offset, hint)),
            None => {
                log::debug!("Hint '{}' has no free occurrence, dropped", hint.anchor_text);
            }
        }
    }

    located.sort_by_key(|(offset, _)| *offset);
    located
        .into_iter()
        .enumerate()
        .map(|(ordinal, (offset, hint))| Marker {
            ordinal: ordinal as u32,
            offset,
            anchor_text: hint.anchor_text.clone(),
            title: hint.title.clone(),
        })
        .collect()
}

/// First occurrence of `needle` at or after `from` that does not start inside
/// a tag.
///
/// Whether a position is inside a tag is decided by the last `<` or `>`
/// before it; the state is carried from one candidate to the next, so each
/// byte before the result is looked at once.
pub fn find_in_text(html: &str, needle: &str, from: usize) -> Option<usize> {
    if needle.is_empty() || from > html.len() || !html.is_char_boundary(from) {
        return None;
    }

    let mut scanned = 0;
    let mut in_tag = false;
    for (i, _) in html[from..].match_indices(needle) {
        let pos = from + i;
        if let Some(last) = html[scanned..pos].rfind(['<', '>']) {
            in_tag = html.as_bytes()[scanned + last] == b'<';
        }
        scanned = pos;
        if !in_tag {
            return Some(pos);
        }
    }
    None
}

/// Byte range of the `</div>` closing the div whose content starts at `from`.
fn matching_div_close(html: &str, from: usize) -> Option<Range<usize>> {
    let mut depth = 1usize;
    for caps in div_tag_regex().captures_iter(&html[from..]) {
        let tag = caps.get(0)?;
        let closing = caps.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(from + tag.start()..from + tag.end());
            }
        } else if !tag.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    None
}

fn remove_ranges(html: &str, ranges: impl Iterator<Item = Range<usize>>) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for range in ranges {
        out.push_str(&html[last..range.start]);
        last = range.end;
    }
    out.push_str(&html[last..]);
    out
}
