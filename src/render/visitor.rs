//! Visitor pattern for customizing table rendering.
//!
//! A [`RowVisitor`] is consulted for the header and for every body row before
//! it is written, and may keep, replace or drop it.
//!
//! # Example
//!
//! ```
//! use bitext::model::AlignedRow;
//! use bitext::render::visitor::{RowVisitor, VisitorAction};
//!
//! /// Drops every row after the first ten.
//! struct FirstTen;
//!
//! impl RowVisitor for FirstTen {
//!     fn visit_row(&mut self, index: usize, _row: &AlignedRow) -> VisitorAction {
//!         if index < 10 {
//!             VisitorAction::Continue
//!         } else {
//!             VisitorAction::Skip
//!         }
//!     }
//! }
//! ```

use crate::model::{AlignedRow, PageInfo};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the whole `<tr>` with custom markup.
    Replace(String),

    /// Skip this row entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the row should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement markup.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement markup if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting table rows during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait RowVisitor: Send + Sync {
    /// Called before rendering the header row.
    ///
    /// # Arguments
    /// * `local` - Left column page
    /// * `foreign` - Right column page
    fn visit_header(&mut self, local: &PageInfo, foreign: &PageInfo) -> VisitorAction {
        let _ = (local, foreign);
        VisitorAction::Continue
    }

    /// Called before rendering a body row.
    ///
    /// # Arguments
    /// * `index` - Position of the row in the alignment, omitted rows included
    /// * `row` - The row about to be rendered
    fn visit_row(&mut self, index: usize, row: &AlignedRow) -> VisitorAction {
        let _ = (index, row);
        VisitorAction::Continue
    }

    /// Called after the opening `<table>` tag is written.
    fn on_table_start(&mut self) {}

    /// Called before the closing `</table>` tag is written.
    ///
    /// # Arguments
    /// * `rendered` - Number of body rows actually written
    fn on_table_end(&mut self, rendered: usize) {
        let _ = rendered;
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl RowVisitor for DefaultVisitor {}

/// Visitor that drops rows with a blank cell on either side.
#[derive(Debug, Clone, Default)]
pub struct SkipOneSidedVisitor;

impl RowVisitor for SkipOneSidedVisitor {
    fn visit_row(&mut self, _index: usize, row: &AlignedRow) -> VisitorAction {
        if row.left.is_blank() || row.right.is_blank() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn RowVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: RowVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RowVisitor for CompositeVisitor {
    fn visit_header(&mut self, local: &PageInfo, foreign: &PageInfo) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_header(local, foreign);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn visit_row(&mut self, index: usize, row: &AlignedRow) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_row(index, row);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_table_start(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_table_start();
        }
    }

    fn on_table_end(&mut self, rendered: usize) {
        for visitor in &mut self.visitors {
            visitor.on_table_end(rendered);
        }
    }
}
