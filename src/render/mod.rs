//! Rendering an alignment: HTML table, JSON, and row visitors.

mod json;
mod options;
mod result;
mod table;
pub mod visitor;

pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_DIRECTION_CLASS_PREFIX, DEFAULT_TABLE_CLASS};
pub use result::{Alignment, AlignmentStats};
pub use table::TableRenderer;
pub use visitor::{CompositeVisitor, DefaultVisitor, RowVisitor, SkipOneSidedVisitor, VisitorAction};
