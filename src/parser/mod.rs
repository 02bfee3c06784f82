//! Markup preparation and splitting: tag catalog, hint blocks, link
//! rewriting, balanced slicing and paragraph units.

mod hints;
mod links;
mod options;
mod paragraphs;
mod slicer;
mod tags;

pub use hints::{find_in_text, parse_hint_body, place_markers, AlignmentHintParser, HintedDocument};
pub use links::{add_match_param, prefix_fragments, LinkRewriter};
pub use options::{AlignOptions, CutMode, DEFAULT_HINT_CLASS, DEFAULT_MATCH_PARAM};
pub use paragraphs::ParagraphSplitter;
pub use slicer::{BalancedSlicer, SlicedDocument};
pub use tags::{OpenStack, OpenTag, TagCatalog, TagKind, TagToken, DEFAULT_TAGS, DEFAULT_TERMINATORS};
