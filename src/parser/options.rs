//! Alignment options and configuration.

use super::TagCatalog;

/// Class name identifying hidden hint blocks.
pub const DEFAULT_HINT_CLASS: &str = "bilingual-hints";

/// Query parameter that keeps the bilingual view active.
pub const DEFAULT_MATCH_PARAM: &str = "match";

/// Options for splitting and aligning documents.
#[derive(Debug, Clone)]
pub struct AlignOptions {
    /// Balance-relevant tags and paragraph terminators
    pub catalog: TagCatalog,

    /// Class name of the hidden hint block
    pub hint_class: String,

    /// Whether links and fragment ids are rewritten before splitting
    pub rewrite_links: bool,

    /// Prefix for fragment ids of the local document
    pub local_prefix: String,

    /// Prefix for fragment ids of the foreign document
    pub foreign_prefix: String,

    /// Query parameter appended to local root-relative links
    pub match_param: String,

    /// Normalize both documents and all hints to Unicode NFC first
    pub normalize_unicode: bool,

    /// Where the foreign document may be cut
    pub cut_mode: CutMode,

    /// Whether batch alignment runs in parallel
    pub parallel: bool,
}

impl AlignOptions {
    /// Create new align options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom tag catalog.
    pub fn with_catalog(mut self, catalog: TagCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the hint block class name.
    pub fn with_hint_class(mut self, class: impl Into<String>) -> Self {
        self.hint_class = class.into();
        self
    }

    /// Enable or disable link rewriting.
    pub fn with_link_rewriting(mut self, rewrite: bool) -> Self {
        self.rewrite_links = rewrite;
        self
    }

    /// Set the fragment id prefixes (local, foreign).
    pub fn with_prefixes(mut self, local: impl Into<String>, foreign: impl Into<String>) -> Self {
        self.local_prefix = local.into();
        self.foreign_prefix = foreign.into();
        self
    }

    /// Set the activation query parameter name.
    pub fn with_match_param(mut self, param: impl Into<String>) -> Self {
        self.match_param = param.into();
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set the cut mode.
    pub fn with_cut_mode(mut self, mode: CutMode) -> Self {
        self.cut_mode = mode;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            catalog: TagCatalog::default(),
            hint_class: DEFAULT_HINT_CLASS.to_string(),
            rewrite_links: true,
            local_prefix: "r_".to_string(),
            foreign_prefix: "l_".to_string(),
            match_param: DEFAULT_MATCH_PARAM.to_string(),
            normalize_unicode: false,
            cut_mode: CutMode::AnyTerminator,
            parallel: true,
        }
    }
}

/// Which paragraph terminators may end a foreign chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// The rightmost terminator, whatever its depth
    #[default]
    AnyTerminator,
    /// Only terminators that close at nesting depth zero
    TopLevel,
}
