//! Table rendering options.

/// Default CSS class of the rendered table.
pub const DEFAULT_TABLE_CLASS: &str = "bilingual";

/// Default prefix of the per-cell content-direction class.
pub const DEFAULT_DIRECTION_CLASS_PREFIX: &str = "mw-content-";

/// Options for rendering an alignment as a two-column table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// CSS class of the `<table>` element
    pub table_class: String,

    /// Emit the header row with language links
    pub include_header: bool,

    /// Prefix for the direction class on body cells (`mw-content-ltr`)
    pub direction_class_prefix: String,

    /// Also omit rows whose cells hold only whitespace
    pub omit_blank_rows: bool,

    /// Put a newline after every row
    pub line_breaks: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table CSS class.
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Enable or disable the header row.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Set the direction class prefix.
    pub fn with_direction_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.direction_class_prefix = prefix.into();
        self
    }

    /// Enable or disable omission of whitespace-only rows.
    pub fn with_blank_rows_omitted(mut self, omit: bool) -> Self {
        self.omit_blank_rows = omit;
        self
    }

    /// Enable or disable newlines between rows.
    pub fn with_line_breaks(mut self, enabled: bool) -> Self {
        self.line_breaks = enabled;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            include_header: true,
            direction_class_prefix: DEFAULT_DIRECTION_CLASS_PREFIX.to_string(),
            omit_blank_rows: true,
            line_breaks: true,
        }
    }
}
