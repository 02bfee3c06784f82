//! The alignment engine.
//!
//! [`align`] runs the whole pipeline for one page pair:
//!
//! 1. optional Unicode NFC normalization of both pages,
//! 2. link and fragment-id rewriting ([`LinkRewriter`]),
//! 3. hint block extraction and marker placement on the local page, hint
//!    block removal on the foreign page ([`AlignmentHintParser`]),
//! 4. balanced slicing of the local page ([`BalancedSlicer`]),
//! 5. column composition ([`ColumnComposer`]).
//!
//! Every step is a pure function of its inputs, so independent page pairs can
//! be aligned in parallel with no coordination.

mod composer;

pub use composer::ColumnComposer;

use std::borrow::Cow;

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Document, PageInfo};
use crate::parser::{AlignOptions, AlignmentHintParser, BalancedSlicer, LinkRewriter};
use crate::render::Alignment;

/// Align a local page with its foreign-language counterpart.
///
/// # Example
///
/// ```
/// use bitext::align::align;
/// use bitext::{AlignOptions, Document};
///
/// let local = Document::new("<p>Hello.</p><p>Bye.</p>", "en");
/// let foreign = Document::new("<p>Bonjour.</p><p>Salut.</p>", "fr");
///
/// let alignment = align(&local, &foreign, &AlignOptions::default());
/// assert_eq!(alignment.rows.len(), 2);
/// ```
pub fn align(local: &Document, foreign: &Document, options: &AlignOptions) -> Alignment {
    let (local_html, foreign_html) = if options.normalize_unicode {
        (
            Cow::Owned(local.html.nfc().collect::<String>()),
            Cow::Owned(foreign.html.nfc().collect::<String>()),
        )
    } else {
        (Cow::Borrowed(local.html.as_str()), Cow::Borrowed(foreign.html.as_str()))
    };

    let (local_html, foreign_html) = if options.rewrite_links {
        let rewriter = LinkRewriter::from_options(options);
        (
            Cow::Owned(rewriter.rewrite_local(&local_html, &foreign.language_code)),
            Cow::Owned(rewriter.rewrite_foreign(&foreign_html)),
        )
    } else {
        (local_html, foreign_html)
    };

    let hint_parser = AlignmentHintParser::new(options.hint_class.as_str());
    let hinted = hint_parser.parse(&local_html, &foreign.language_code);
    let foreign_html = hint_parser.strip(&foreign_html);
    log::debug!(
        "Aligning {} -> {}: {} hint(s), {} marker(s)",
        local.language_code,
        foreign.language_code,
        hinted.hints.len(),
        hinted.markers.len()
    );

    let sliced = BalancedSlicer::new(&options.catalog).slice(&hinted.html, &hinted.markers);

    let mut composer = ColumnComposer::new(&options.catalog, options.cut_mode);
    let rows = composer.compose(&sliced, &foreign_html);

    let mut stats = composer.into_stats();
    stats.hint_count = hinted.hints.len() as u32;
    stats.marker_count = sliced.markers.len() as u32;
    stats.merged_fragment_count = sliced.merged as u32;

    Alignment {
        local: PageInfo::from(local),
        foreign: PageInfo::from(foreign),
        hints: hinted.hints,
        markers: sliced.markers,
        rows,
        stats,
    }
}

/// Align many page pairs, in parallel unless `options.parallel` is off.
///
/// Results come back in input order.
pub fn align_batch(pairs: &[(Document, Document)], options: &AlignOptions) -> Vec<Alignment> {
    if options.parallel {
        pairs
            .par_iter()
            .map(|(local, foreign)| align(local, foreign, options))
            .collect()
    } else {
        pairs
            .iter()
            .map(|(local, foreign)| align(local, foreign, options))
            .collect()
    }
}
