//! Fragment, paragraph and row types produced while aligning.

use serde::{Deserialize, Serialize};

/// A contiguous, independently balanced slice of a document.
///
/// Any catalog tag left open where the slice was cut has been closed at the
/// end of `html`; `carried` lists those tag names (outermost first) so the
/// next fragment can reopen them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Repaired markup
    pub html: String,

    /// Tags closed synthetically at the end of this fragment
    pub carried: Vec<String>,
}

impl Fragment {
    /// Create a fragment with nothing carried forward.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            carried: Vec::new(),
        }
    }

    /// An empty placeholder left behind when a slice is merged forward.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the fragment holds no markup.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// A top-level paragraph of a balanced fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParagraphUnit(pub String);

impl ParagraphUnit {
    /// Create a paragraph unit.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Markup of the unit.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the unit is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the unit holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ParagraphUnit {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ParagraphUnit {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One output row pairing a local paragraph with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// Local (left column) paragraph
    pub left: ParagraphUnit,

    /// Foreign (right column) paragraph
    pub right: ParagraphUnit,
}

impl AlignedRow {
    /// Create a row.
    pub fn new(left: impl Into<ParagraphUnit>, right: impl Into<ParagraphUnit>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Check if both cells are empty strings.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Check if both cells hold only whitespace.
    pub fn is_blank(&self) -> bool {
        self.left.is_blank() && self.right.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_empty() {
        assert!(Fragment::empty().is_empty());
        assert!(!Fragment::new("<p>x</p>").is_empty());
    }

    #[test]
    fn test_row_blank() {
        let row = AlignedRow::new("\n", "  ");
        assert!(row.is_blank());
        assert!(!row.is_empty());

        let row = AlignedRow::new("<p>a</p>", "");
        assert!(!row.is_blank());
    }

    #[test]
    fn test_paragraph_unit_serializes_as_string() {
        let unit = ParagraphUnit::new("<p>a</p>");
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, "\"<p>a</p>\"");
    }
}
