//! Alignment result with page metadata and statistics.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{AlignedRow, AlignmentHint, Marker, PageInfo};

use super::{to_json, JsonFormat, RenderOptions, RowVisitor, TableRenderer};

/// Result of aligning a local page with its translation.
///
/// Rendering is deterministic: the same alignment always yields the same
/// table markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alignment {
    /// Local (left column) page
    pub local: PageInfo,

    /// Foreign (right column) page
    pub foreign: PageInfo,

    /// Hints read from the local page's hint block
    pub hints: Vec<AlignmentHint>,

    /// Hints that were located and used as split points
    pub markers: Vec<Marker>,

    /// Aligned rows, in document order
    pub rows: Vec<AlignedRow>,

    /// Statistics collected while aligning
    pub stats: AlignmentStats,
}

impl Alignment {
    /// Render the two-column table.
    pub fn to_html(&self, options: &RenderOptions) -> String {
        TableRenderer::new(options.clone()).render(self)
    }

    /// Render the table, consulting a visitor for every row.
    pub fn to_html_with_visitor(
        &self,
        options: &RenderOptions,
        visitor: &mut dyn RowVisitor,
    ) -> String {
        TableRenderer::new(options.clone()).render_with_visitor(self, visitor)
    }

    /// Serialize to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }

    /// Left column markup, concatenated.
    pub fn left_text(&self) -> String {
        self.rows.iter().map(|r| r.left.as_str()).collect()
    }

    /// Right column markup, concatenated.
    pub fn right_text(&self) -> String {
        self.rows.iter().map(|r| r.right.as_str()).collect()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Statistics collected during alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStats {
    /// Entries in the hint block
    pub hint_count: u32,

    /// Hints located in the local page
    pub marker_count: u32,

    /// Local fragments with content
    pub fragment_count: u32,

    /// Local fragments merged into their successor
    pub merged_fragment_count: u32,

    /// Chunks flushed by the composer
    pub chunk_count: u32,

    /// Chunks paired as a whole because paragraph counts differed
    pub fallback_count: u32,

    /// Rows produced by the composer
    pub row_count: u32,

    /// Rows left out of the rendered table
    pub omitted_row_count: u32,

    /// Paragraph units on the local side
    pub left_paragraphs: u32,

    /// Paragraph units on the foreign side
    pub right_paragraphs: u32,
}

impl AlignmentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one flushed chunk.
    pub fn add_chunk(&mut self, left_paragraphs: usize, right_paragraphs: usize) {
        self.chunk_count += 1;
        self.left_paragraphs += left_paragraphs as u32;
        self.right_paragraphs += right_paragraphs as u32;
    }

    /// Increment fallback count.
    pub fn add_fallback(&mut self) {
        self.fallback_count += 1;
    }

    /// Add produced rows.
    pub fn add_rows(&mut self, count: usize) {
        self.row_count += count as u32;
    }

    /// Share of chunks that fell back to whole-chunk pairing.
    pub fn fallback_ratio(&self) -> f64 {
        if self.chunk_count == 0 {
            0.0
        } else {
            f64::from(self.fallback_count) / f64::from(self.chunk_count)
        }
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &AlignmentStats) {
        self.hint_count += other.hint_count;
        self.marker_count += other.marker_count;
        self.fragment_count += other.fragment_count;
        self.merged_fragment_count += other.merged_fragment_count;
        self.chunk_count += other.chunk_count;
        self.fallback_count += other.fallback_count;
        self.row_count += other.row_count;
        self.omitted_row_count += other.omitted_row_count;
        self.left_paragraphs += other.left_paragraphs;
        self.right_paragraphs += other.right_paragraphs;
    }
}
