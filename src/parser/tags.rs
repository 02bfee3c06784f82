//! The catalog of balance-relevant tags and a tokenizer over them.
//!
//! Only the names listed in a [`TagCatalog`] take part in nesting; every other
//! piece of markup passes through the engine untouched.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

fn id_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\sid\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+)"#).expect("valid id pattern")
    })
}

/// Element names whose open/close nesting is tracked by default.
pub const DEFAULT_TAGS: &[&str] = &[
    "div",
    "p",
    "span",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "td",
    "th",
    "caption",
    "ul",
    "ol",
    "li",
    "dl",
    "dt",
    "dd",
    "blockquote",
    "pre",
    "center",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "b",
    "i",
    "u",
    "s",
    "em",
    "strong",
    "small",
    "big",
    "sub",
    "sup",
    "code",
    "font",
    "a",
];

/// Closing tags that end a paragraph unit at nesting depth zero.
pub const DEFAULT_TERMINATORS: &[&str] = &["p", "div"];

/// Whether a catalog tag opens or closes an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
}

/// A catalog tag found in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken<'a> {
    /// Open or close
    pub kind: TagKind,
    /// Lowercased element name
    pub name: String,
    /// Byte offset of `<`
    pub start: usize,
    /// Byte offset just past `>`
    pub end: usize,
    /// The tag as written, attributes included
    pub raw: &'a str,
}

/// Fixed set of element names considered for balance.
#[derive(Debug, Clone)]
pub struct TagCatalog {
    tags: Vec<String>,
    terminators: Vec<String>,
    pattern: Regex,
}

impl TagCatalog {
    /// Build a catalog from element names and paragraph terminators.
    ///
    /// Terminators missing from `tags` are added to it. Names are matched
    /// ASCII case-insensitively.
    pub fn new<I, T, J, U>(tags: I, terminators: J) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
        J: IntoIterator<Item = U>,
        U: AsRef<str>,
    {
        let terminators: Vec<String> = terminators
            .into_iter()
            .map(|t| t.as_ref().trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let mut names: Vec<String> = Vec::new();
        let candidates = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_ascii_lowercase())
            .chain(terminators.iter().cloned());
        for name in candidates {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        // Comments are matched so that tags inside them can be skipped.
        let pattern = Regex::new(&format!(r"(?is)<!--.*?-->|<(/?)({})\b[^>]*>", alternation))?;

        Ok(Self {
            tags: names,
            terminators,
            pattern,
        })
    }

    /// The default catalog, compiled once.
    pub fn standard() -> &'static TagCatalog {
        static STANDARD: OnceLock<TagCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            TagCatalog::new(DEFAULT_TAGS.iter(), DEFAULT_TERMINATORS.iter())
                .expect("default tag catalog is a valid pattern")
        })
    }

    /// Tracked element names.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Paragraph terminator names.
    pub fn terminators(&self) -> &[String] {
        &self.terminators
    }

    /// Check if `name` is tracked.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// Check if closing `name` ends a paragraph unit.
    pub fn is_terminator(&self, name: &str) -> bool {
        self.terminators.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// Iterate over catalog tags in `html`, left to right.
    ///
    /// Tags inside comments and self-closing forms (`<span/>`) are skipped.
    pub fn tokens<'a>(&'a self, html: &'a str) -> impl Iterator<Item = TagToken<'a>> + 'a {
        self.pattern.captures_iter(html).filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(2)?;
            let raw = whole.as_str();
            if raw.ends_with("/>") {
                return None;
            }
            let kind = match caps.get(1) {
                Some(slash) if !slash.as_str().is_empty() => TagKind::Close,
                _ => TagKind::Open,
            };
            Some(TagToken {
                kind,
                name: name.as_str().to_ascii_lowercase(),
                start: whole.start(),
                end: whole.end(),
                raw,
            })
        })
    }

    /// Count catalog opening and closing tags in `html`.
    pub fn balance_counts(&self, html: &str) -> (usize, usize) {
        self.tokens(html).fold((0, 0), |(open, close), token| match token.kind {
            TagKind::Open => (open + 1, close),
            TagKind::Close => (open, close + 1),
        })
    }

    /// Check that every catalog tag in `html` is closed in nesting order.
    pub fn is_balanced(&self, html: &str) -> bool {
        let mut stack: Vec<String> = Vec::new();
        for token in self.tokens(html) {
            match token.kind {
                TagKind::Open => stack.push(token.name),
                TagKind::Close => {
                    if stack.pop().as_deref() != Some(token.name.as_str()) {
                        return false;
                    }
                }
            }
        }
        stack.is_empty()
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}

/// An opening tag still waiting for its closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    /// Lowercased element name
    pub name: String,
    /// Opening tag as written, reused when the element is reopened
    pub raw: String,
}

/// Stack of currently open catalog tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenStack {
    entries: Vec<OpenTag>,
}

impl OpenStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one token. Returns `false` for a stray closing tag that matches
    /// nothing on the stack; such tags leave the stack unchanged.
    ///
    /// A closer matching a deeper entry implicitly closes everything above it.
    pub fn apply(&mut self, token: &TagToken<'_>) -> bool {
        match token.kind {
            TagKind::Open => {
                self.entries.push(OpenTag {
                    name: token.name.clone(),
                    raw: token.raw.to_string(),
                });
                true
            }
            TagKind::Close => match self.entries.iter().rposition(|e| e.name == token.name) {
                Some(pos) => {
                    self.entries.truncate(pos);
                    true
                }
                None => false,
            },
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open tags, outermost first.
    pub fn entries(&self) -> &[OpenTag] {
        &self.entries
    }

    /// Open tag names, outermost first.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Closing tags for everything open, innermost first.
    pub fn closers(&self) -> String {
        self.entries
            .iter()
            .rev()
            .map(|e| format!("</{}>", e.name))
            .collect()
    }

    /// The original opening tags, outermost first.
    pub fn openers(&self) -> String {
        self.entries.iter().map(|e| e.raw.as_str()).collect()
    }

    /// Opening tags for continuing the elements in a new fragment.
    ///
    /// Same as [`openers`](Self::openers) minus `id` attributes, which must
    /// stay on the first occurrence of their element.
    pub fn reopeners(&self) -> String {
        self.entries
            .iter()
            .map(|e| id_attr_regex().replace_all(&e.raw, ""))
            .collect()
    }
}
