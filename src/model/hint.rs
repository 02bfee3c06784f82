//! Alignment hint types.

use serde::{Deserialize, Serialize};

/// One `key = value` entry parsed from a hidden hint block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentHint {
    /// Position of the entry in the hint block (0-based)
    pub index: u32,

    /// Literal text in the local document that marks the alignment point
    pub anchor_text: String,

    /// Advisory label; the counterpart phrase in the foreign document
    pub title: String,
}

impl AlignmentHint {
    /// Create a new hint.
    pub fn new(index: u32, anchor_text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            index,
            anchor_text: anchor_text.into(),
            title: title.into(),
        }
    }
}

/// A located alignment point inside the hint-free local document.
///
/// Markers are zero-width: they only record where the document is split and
/// never produce output of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Unique ordinal, increasing with `offset`
    pub ordinal: u32,

    /// Byte offset of the anchor text in the local document
    pub offset: usize,

    /// Anchor text found at `offset`
    pub anchor_text: String,

    /// Advisory title carried over from the hint
    pub title: String,
}

impl Marker {
    /// Text to look for in the foreign document.
    ///
    /// This is the hint's title; hints with an empty title fall back to the
    /// anchor text (names that read the same in both languages).
    pub fn counterpart(&self) -> &str {
        if self.title.is_empty() {
            &self.anchor_text
        } else {
            &self.title
        }
    }
}
