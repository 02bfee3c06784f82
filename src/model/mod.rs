//! Data model for bilingual alignment.
//!
//! Documents are read-only inputs. Fragments, paragraph units and rows are
//! plain values created and consumed within a single alignment request.

mod document;
mod fragment;
mod hint;

pub use document::{Direction, Document, Language, PageInfo};
pub use fragment::{AlignedRow, Fragment, ParagraphUnit};
pub use hint::{AlignmentHint, Marker};
