//! Document-level types.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_bidi::BidiInfo;

/// A rendered wiki page handed to the alignment engine.
///
/// Documents are immutable inputs; every stage of the engine derives new
/// values from them instead of editing them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Rendered page HTML
    pub html: String,

    /// Language code (e.g., "en", "de")
    pub language_code: String,

    /// Human-readable language name shown in the header row
    pub display_name: String,

    /// Text direction of the page content
    pub direction: Direction,

    /// Canonical URL of the page
    pub canonical_url: String,
}

impl Document {
    /// Create a new left-to-right document whose display name is its code.
    pub fn new(html: impl Into<String>, language_code: impl Into<String>) -> Self {
        let language_code = language_code.into();
        Self {
            html: html.into(),
            display_name: language_code.clone(),
            language_code,
            direction: Direction::Ltr,
            canonical_url: String::new(),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the text direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the canonical URL.
    pub fn with_canonical_url(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = url.into();
        self
    }

    /// Copy the display name and direction from resolved language metadata.
    pub fn with_language(mut self, language: &Language) -> Self {
        self.display_name = language.name.clone();
        self.direction = language.direction;
        self
    }

    /// Check if the document has no markup at all.
    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }
}

/// Text direction of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left
    Rtl,
}

impl Direction {
    /// Value used for the HTML `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// Parse a `dir` attribute value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }

    /// Guess the direction from the first paragraph of text content.
    ///
    /// Markup is stripped first so tag names do not count as strong
    /// left-to-right characters.
    pub fn detect(html: &str) -> Self {
        let text = strip_markup(html);
        let info = BidiInfo::new(&text, None);
        match info.paragraphs.first() {
            Some(para) if para.level.is_rtl() => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page metadata shown around the aligned columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Language code
    pub language_code: String,

    /// Human-readable language name
    pub display_name: String,

    /// Text direction
    pub direction: Direction,

    /// Canonical URL of the page
    pub canonical_url: String,
}

impl From<&Document> for PageInfo {
    fn from(doc: &Document) -> Self {
        Self {
            language_code: doc.language_code.clone(),
            display_name: doc.display_name.clone(),
            direction: doc.direction,
            canonical_url: doc.canonical_url.clone(),
        }
    }
}

/// Resolved language metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language code
    pub code: String,

    /// Display name (autonym)
    pub name: String,

    /// Script direction
    pub direction: Direction,
}

impl Language {
    /// Create language metadata.
    pub fn new(code: impl Into<String>, name: impl Into<String>, direction: Direction) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            direction,
        }
    }
}

/// Drop everything between `<` and `>`, keeping text content.
fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("<p>Hallo</p>", "de")
            .with_display_name("Deutsch")
            .with_canonical_url("https://de.example.org/wiki/Hallo");

        assert_eq!(doc.language_code, "de");
        assert_eq!(doc.display_name, "Deutsch");
        assert_eq!(doc.direction, Direction::Ltr);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_page_info_from_document() {
        let doc = Document::new("<p>x</p>", "ar")
            .with_display_name("العربية")
            .with_direction(Direction::Rtl)
            .with_canonical_url("/wiki/X");
        let info = PageInfo::from(&doc);
        assert_eq!(info.language_code, "ar");
        assert_eq!(info.direction, Direction::Rtl);
        assert_eq!(info.canonical_url, "/wiki/X");
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("RTL"), Some(Direction::Rtl));
        assert_eq!(Direction::parse(" ltr "), Some(Direction::Ltr));
        assert_eq!(Direction::parse("auto"), None);
    }

    #[test]
    fn test_direction_detect() {
        assert_eq!(Direction::detect("<p>Hello world</p>"), Direction::Ltr);
        assert_eq!(Direction::detect("<p>שלום עולם</p>"), Direction::Rtl);
        assert_eq!(Direction::detect("<p>مرحبا</p>"), Direction::Rtl);
    }
}
