//! Two-column HTML table rendering.

use crate::model::{AlignedRow, PageInfo};

use super::visitor::{DefaultVisitor, RowVisitor, VisitorAction};
use super::{Alignment, AlignmentStats, RenderOptions};

/// Renders an [`Alignment`] as a `<table>` with one row per aligned pair.
///
/// The header row links each side to its canonical URL under the language's
/// display name. Body cells carry `lang`, `dir` and a direction class taken
/// from their page. Rows with nothing in either cell are never written.
pub struct TableRenderer {
    options: RenderOptions,
    stats: AlignmentStats,
}

impl TableRenderer {
    /// Create a new table renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: AlignmentStats::new(),
        }
    }

    /// Render the table.
    pub fn render(self, alignment: &Alignment) -> String {
        self.render_with_visitor(alignment, &mut DefaultVisitor)
    }

    /// Render the table, consulting `visitor` for the header and every row.
    pub fn render_with_visitor(
        mut self,
        alignment: &Alignment,
        visitor: &mut dyn RowVisitor,
    ) -> String {
        self.render_internal(alignment, visitor)
    }

    /// Render the table and return it with the alignment's statistics,
    /// updated with the number of omitted rows.
    pub fn render_with_stats(mut self, alignment: &Alignment) -> (String, AlignmentStats) {
        let html = self.render_internal(alignment, &mut DefaultVisitor);
        let mut stats = alignment.stats.clone();
        stats.omitted_row_count += self.stats.omitted_row_count;
        (html, stats)
    }

    fn render_internal(&mut self, alignment: &Alignment, visitor: &mut dyn RowVisitor) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "<table class=\"{}\">",
            escape_attr(&self.options.table_class)
        ));
        self.newline(&mut output);
        visitor.on_table_start();

        if self.options.include_header {
            match visitor.visit_header(&alignment.local, &alignment.foreign) {
                VisitorAction::Continue => {
                    self.render_header(&mut output, &alignment.local, &alignment.foreign)
                }
                VisitorAction::Replace(markup) => {
                    output.push_str(&markup);
                    self.newline(&mut output);
                }
                VisitorAction::Skip => {}
            }
        }

        let mut rendered = 0;
        for (index, row) in alignment.rows.iter().enumerate() {
            if self.is_omitted(row) {
                self.stats.omitted_row_count += 1;
                continue;
            }
            match visitor.visit_row(index, row) {
                VisitorAction::Continue => {
                    self.render_row(&mut output, row, &alignment.local, &alignment.foreign)
                }
                VisitorAction::Replace(markup) => {
                    output.push_str(&markup);
                    self.newline(&mut output);
                }
                VisitorAction::Skip => {
                    self.stats.omitted_row_count += 1;
                    continue;
                }
            }
            rendered += 1;
        }

        visitor.on_table_end(rendered);
        output.push_str("</table>");
        if self.stats.omitted_row_count > 0 {
            log::debug!("Omitted {} row(s)", self.stats.omitted_row_count);
        }
        output
    }

    fn is_omitted(&self, row: &AlignedRow) -> bool {
        row.is_empty() || (self.options.omit_blank_rows && row.is_blank())
    }

    fn render_header(&self, output: &mut String, local: &PageInfo, foreign: &PageInfo) {
        output.push_str("<tr>");
        for page in [local, foreign] {
            output.push_str(&format!("<th lang=\"{}\">", escape_attr(&page.language_code)));
            let name = escape_text(&page.display_name);
            if page.canonical_url.is_empty() {
                output.push_str(&name);
            } else {
                output.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    escape_attr(&page.canonical_url),
                    name
                ));
            }
            output.push_str("</th>");
        }
        output.push_str("</tr>");
        self.newline(output);
    }

    fn render_row(&self, output: &mut String, row: &AlignedRow, local: &PageInfo, foreign: &PageInfo) {
        output.push_str("<tr>");
        for (page, cell) in [(local, row.left.as_str()), (foreign, row.right.as_str())] {
            let dir = page.direction.as_str();
            output.push_str(&format!(
                "<td lang=\"{}\" dir=\"{}\" class=\"{}{}\">",
                escape_attr(&page.language_code),
                dir,
                escape_attr(&self.options.direction_class_prefix),
                dir
            ));
            output.push_str(cell);
            output.push_str("</td>");
        }
        output.push_str("</tr>");
        self.newline(output);
    }

    fn newline(&self, output: &mut String) {
        if self.options.line_breaks {
            output.push('\n');
        }
    }
}

/// Escape text content.
fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value for double quotes.
fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
