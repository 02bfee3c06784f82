//! # bitext
//!
//! Side-by-side bilingual rendering of wiki pages.
//!
//! Given a rendered page and its translation in another language, this
//! library produces a two-column table that pairs each paragraph of the
//! page with the matching paragraph of the translation. Editors can steer the
//! pairing with a hidden hint block listing phrases that begin corresponding
//! sections in both languages.
//!
//! ## Quick Start
//!
//! ```
//! use bitext::{Bitext, Document};
//!
//! let local = Document::new("<p>The cat sleeps.</p><p>It purrs.</p>", "en");
//! let foreign = Document::new("<p>Die Katze schläft.</p><p>Sie schnurrt.</p>", "de");
//!
//! let alignment = Bitext::new().align(&local, &foreign);
//! assert_eq!(alignment.rows.len(), 2);
//!
//! let table = alignment.to_html(&bitext::RenderOptions::default());
//! assert!(table.contains("<td lang=\"de\""));
//! ```
//!
//! ## Features
//!
//! - **Hint-driven alignment**: `key = value` pairs split both pages into
//!   corresponding sections
//! - **Balanced fragments**: every cell is well-formed markup, even when a
//!   split falls inside nested elements
//! - **Link rewriting**: fragment ids never collide between the columns
//! - **Parallel batches**: uses Rayon for many page pairs
//! - **Fetching and caching**: pluggable fetchers and an expiring cache for
//!   serving bilingual views on request

pub mod activation;
pub mod align;
pub mod cache;
pub mod error;
pub mod fetch;
pub mod language;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use activation::{requested_language, BilingualView};
pub use align::{align, align_batch};
pub use cache::{AlignmentCache, CacheKey};
pub use error::{Error, Result};
pub use fetch::{DocumentFetcher, FetcherRegistry, FileFetcher};
pub use language::{BuiltinLanguages, LanguageResolver};
pub use model::{AlignedRow, AlignmentHint, Direction, Document, Language, ParagraphUnit};
pub use parser::{AlignOptions, CutMode, TagCatalog};
pub use render::{Alignment, AlignmentStats, JsonFormat, RenderOptions};

use std::path::Path;

use parser::{AlignmentHintParser, ParagraphSplitter};

/// Align two documents and render the table with default options.
///
/// # Example
///
/// ```
/// use bitext::{render_bilingual, Document};
///
/// let local = Document::new("<p>Hello.</p>", "en");
/// let foreign = Document::new("<p>Bonjour.</p>", "fr");
///
/// let table = render_bilingual(&local, &foreign);
/// assert!(table.starts_with("<table"));
/// ```
pub fn render_bilingual(local: &Document, foreign: &Document) -> String {
    Bitext::new().render(local, foreign)
}

/// Remove every alignment hint block from `html`.
///
/// Pages are served through this when the bilingual view is off.
///
/// # Example
///
/// ```
/// use bitext::strip_hints;
///
/// let html = r#"<div class="bilingual-hints" data-lang="de">A = B</div><p>A</p>"#;
/// assert_eq!(strip_hints(html), "<p>A</p>");
/// ```
pub fn strip_hints(html: &str) -> String {
    AlignmentHintParser::default().strip(html)
}

/// Split `html` into paragraph units with the standard tag catalog.
pub fn split_paragraphs(html: &str) -> Vec<ParagraphUnit> {
    ParagraphSplitter::new(TagCatalog::standard()).split(html)
}

/// Read two HTML files and align them with default options.
///
/// Language names and directions come from the built-in table; unknown
/// codes get their direction from the page text.
///
/// # Example
///
/// ```no_run
/// use bitext::align_files;
///
/// let alignment = align_files("en/Cat.html", "en", "de/Katze.html", "de")?;
/// println!("{} rows", alignment.rows.len());
/// # Ok::<(), bitext::Error>(())
/// ```
pub fn align_files<P: AsRef<Path>, Q: AsRef<Path>>(
    local_path: P,
    local_language: &str,
    foreign_path: Q,
    foreign_language: &str,
) -> Result<Alignment> {
    let languages = BuiltinLanguages;
    let local_html = std::fs::read_to_string(local_path)?;
    let local = Document::new(local_html.as_str(), local_language)
        .with_language(&languages.resolve_for_page(local_language, &local_html));

    let foreign_path = foreign_path.as_ref();
    let foreign_html = std::fs::read_to_string(foreign_path)
        .map_err(|e| Error::unavailable(foreign_path.display().to_string(), e))?;
    let language = languages.resolve_for_page(foreign_language, &foreign_html);
    let foreign = Document::new(foreign_html, foreign_language).with_language(&language);

    Ok(Bitext::new().align(&local, &foreign))
}

/// Builder bundling alignment and rendering options.
///
/// # Example
///
/// ```
/// use bitext::{Bitext, Document};
///
/// let bitext = Bitext::new()
///     .with_hint_class("translation-hints")
///     .with_unicode_normalization()
///     .without_header();
///
/// let local = Document::new("<p>One</p>", "en");
/// let foreign = Document::new("<p>Uno</p>", "es");
/// let table = bitext.render(&local, &foreign);
/// assert!(!table.contains("<th"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bitext {
    align_options: AlignOptions,
    render_options: RenderOptions,
}

impl Bitext {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alignment options.
    pub fn with_align_options(mut self, options: AlignOptions) -> Self {
        self.align_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the hint block class name.
    pub fn with_hint_class(mut self, class: impl Into<String>) -> Self {
        self.align_options = self.align_options.with_hint_class(class);
        self
    }

    /// Use a custom tag catalog.
    pub fn with_catalog(mut self, catalog: TagCatalog) -> Self {
        self.align_options = self.align_options.with_catalog(catalog);
        self
    }

    /// Leave `id` and `href` attributes alone.
    pub fn without_link_rewriting(mut self) -> Self {
        self.align_options = self.align_options.with_link_rewriting(false);
        self
    }

    /// NFC-normalize both documents before aligning.
    pub fn with_unicode_normalization(mut self) -> Self {
        self.align_options = self.align_options.with_unicode_normalization(true);
        self
    }

    /// Set where foreign text may be cut.
    pub fn with_cut_mode(mut self, mode: CutMode) -> Self {
        self.align_options = self.align_options.with_cut_mode(mode);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.align_options = self.align_options.sequential();
        self
    }

    /// Set the table CSS class.
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_table_class(class);
        self
    }

    /// Omit the header row.
    pub fn without_header(mut self) -> Self {
        self.render_options = self.render_options.with_header(false);
        self
    }

    /// Alignment options in effect.
    pub fn align_options(&self) -> &AlignOptions {
        &self.align_options
    }

    /// Render options in effect.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Align a local page with its translation.
    pub fn align(&self, local: &Document, foreign: &Document) -> Alignment {
        align::align(local, foreign, &self.align_options)
    }

    /// Align and render the two-column table.
    pub fn render(&self, local: &Document, foreign: &Document) -> String {
        self.align(local, foreign).to_html(&self.render_options)
    }

    /// Align many page pairs; results come back in input order.
    pub fn align_batch(&self, pairs: &[(Document, Document)]) -> Vec<Alignment> {
        align::align_batch(pairs, &self.align_options)
    }
}
