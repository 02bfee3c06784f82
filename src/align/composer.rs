//! Pairing local fragments with chunks of the foreign page.

use crate::model::{AlignedRow, Marker};
use crate::parser::{find_in_text, CutMode, ParagraphSplitter, SlicedDocument, TagCatalog};
use crate::render::AlignmentStats;

/// Walks the local fragments and cuts the foreign page to match.
///
/// For every non-empty local fragment the foreign text is searched for the
/// counterpart of the marker ending that fragment, and cut at the last
/// paragraph boundary before it. Fragments whose counterpart cannot be cut
/// accumulate until a later cut succeeds. Each flushed chunk pair is split
/// into paragraphs and paired positionally, or kept whole when the paragraph
/// counts differ.
pub struct ColumnComposer<'a> {
    splitter: ParagraphSplitter<'a>,
    cut_mode: CutMode,
    stats: AlignmentStats,
}

impl<'a> ColumnComposer<'a> {
    /// Create a composer.
    pub fn new(catalog: &'a TagCatalog, cut_mode: CutMode) -> Self {
        Self {
            splitter: ParagraphSplitter::new(catalog),
            cut_mode,
            stats: AlignmentStats::new(),
        }
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &AlignmentStats {
        &self.stats
    }

    /// Consume the composer, returning its statistics.
    pub fn into_stats(self) -> AlignmentStats {
        self.stats
    }

    /// Align the sliced local page with the full foreign text.
    ///
    /// Concatenating the left cells gives back every non-empty fragment, and
    /// concatenating the right cells gives back `foreign`.
    pub fn compose(&mut self, local: &SlicedDocument, foreign: &str) -> Vec<AlignedRow> {
        let mut rows = Vec::new();
        let mut rest = foreign;
        let mut left = String::new();
        let mut right = String::new();
        let last = local.fragments.len().saturating_sub(1);

        for (i, fragment) in local.fragments.iter().enumerate() {
            if fragment.is_empty() {
                continue;
            }
            self.stats.fragment_count += 1;
            left.push_str(&fragment.html);

            let cut = if i == last {
                Some(rest.len())
            } else {
                local.markers.get(i).and_then(|m| self.find_cut(rest, m))
            };

            if let Some(cut) = cut {
                right.push_str(&rest[..cut]);
                rest = &rest[cut..];
                self.flush(&mut rows, &left, &right);
                left.clear();
                right.clear();
            }
        }

        if !left.is_empty() || !rest.is_empty() {
            right.push_str(rest);
            self.flush(&mut rows, &left, &right);
        }

        rows
    }

    /// Byte offset in `rest` up to which the foreign text belongs to the
    /// fragment ending at `marker`.
    fn find_cut(&self, rest: &str, marker: &Marker) -> Option<usize> {
        let needle = marker.counterpart();
        let Some(pos) = find_in_text(rest, needle, 0) else {
            log::debug!("Counterpart '{}' not found in foreign text", needle);
            return None;
        };

        let top_level = self.cut_mode == CutMode::TopLevel;
        let boundary = self.splitter.last_boundary(&rest[..pos], top_level);
        if boundary.is_none() {
            log::debug!("No paragraph boundary before '{}', merging", needle);
        }
        boundary
    }

    fn flush(&mut self, rows: &mut Vec<AlignedRow>, left: &str, right: &str) {
        let left_units = self.splitter.split(left);
        let right_units = self.splitter.split(right);
        self.stats.add_chunk(left_units.len(), right_units.len());

        if left_units.len() == right_units.len() {
            let count = left_units.len();
            rows.extend(
                left_units
                    .into_iter()
                    .zip(right_units)
                    .map(|(l, r)| AlignedRow { left: l, right: r }),
            );
            self.stats.add_rows(count);
        } else {
            log::debug!(
                "Paragraph count mismatch ({} vs {}), pairing the chunk whole",
                left_units.len(),
                right_units.len()
            );
            self.stats.add_fallback();
            rows.push(AlignedRow::new(left, right));
            self.stats.add_rows(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;

    fn marker(title: &str) -> Marker {
        Marker {
            ordinal: 0,
            offset: 0,
            anchor_text: String::new(),
            title: title.to_string(),
        }
    }

    fn compose(local: &SlicedDocument, foreign: &str) -> (Vec<AlignedRow>, AlignmentStats) {
        let mut composer = ColumnComposer::new(TagCatalog::standard(), CutMode::TopLevel);
        let rows = composer.compose(local, foreign);
        (rows, composer.into_stats())
    }

    #[test]
    fn test_single_fragment_pairs_paragraphs() {
        let local = SlicedDocument {
            fragments: vec![Fragment::new("<p>One</p><p>Two</p>")],
            ..Default::default()
        };
        let (rows, stats) = compose(&local, "<p>Un</p><p>Deux</p>");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AlignedRow::new("<p>One</p>", "<p>Un</p>"));
        assert_eq!(rows[1], AlignedRow::new("<p>Two</p>", "<p>Deux</p>"));
        assert_eq!(stats.fallback_count, 0);
    }

    #[test]
    fn test_count_mismatch_falls_back_to_one_row() {
        let local = SlicedDocument {
            fragments: vec![Fragment::new("<p>a</p><p>b</p><p>c</p>")],
            ..Default::default()
        };
        let (rows, stats) = compose(&local, "<p>x</p><p>y</p>");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].left.as_str(), "<p>a</p><p>b</p><p>c</p>");
        assert_eq!(rows[0].right.as_str(), "<p>x</p><p>y</p>");
        assert_eq!(stats.fallback_count, 1);
    }

    #[test]
    fn test_cut_at_boundary_before_counterpart() {
        let local = SlicedDocument {
            fragments: vec![
                Fragment::new("<p>Intro</p>"),
                Fragment::new("<p>Hello there</p>"),
            ],
            markers: vec![marker("Bonjour")],
            merged: 0,
        };
        let (rows, stats) = compose(&local, "<p>Intro FR</p><p>Bonjour toi</p>");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AlignedRow::new("<p>Intro</p>", "<p>Intro FR</p>"));
        assert_eq!(
            rows[1],
            AlignedRow::new("<p>Hello there</p>", "<p>Bonjour toi</p>")
        );
        assert_eq!(stats.chunk_count, 2);
    }

    #[test]
    fn test_missing_counterpart_accumulates() {
        let local = SlicedDocument {
            fragments: vec![Fragment::new("<p>A</p>"), Fragment::new("<p>B</p>")],
            markers: vec![marker("absent")],
            merged: 0,
        };
        let (rows, stats) = compose(&local, "<p>X</p><p>Y</p>");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AlignedRow::new("<p>A</p>", "<p>X</p>"));
        assert_eq!(stats.chunk_count, 1);
    }

    #[test]
    fn test_counterpart_without_boundary_accumulates() {
        let local = SlicedDocument {
            fragments: vec![Fragment::new("<p>A</p>"), Fragment::new("<p>B</p>")],
            markers: vec![marker("Y")],
            merged: 0,
        };
        let (rows, _) = compose(&local, "<p>X Y</p>");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].left.as_str(), "<p>A</p><p>B</p>");
        assert_eq!(rows[0].right.as_str(), "<p>X Y</p>");
    }

    #[test]
    fn test_empty_fragments_are_skipped() {
        let local = SlicedDocument {
            fragments: vec![Fragment::new("<p>A</p>"), Fragment::empty(), Fragment::new("<p>C</p>")],
            markers: vec![marker("Q"), marker("R")],
            merged: 1,
        };
        let (rows, stats) = compose(&local, "<p>P</p><p>Q</p>");

        assert_eq!(stats.fragment_count, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AlignedRow::new("<p>A</p>", "<p>P</p>"));
        assert_eq!(rows[1], AlignedRow::new("<p>C</p>", "<p>Q</p>"));
    }

    #[test]
    fn test_empty_last_fragment_flushes_remaining_text() {
        let local = SlicedDocument {
            fragments: vec![Fragment::new("<p>A</p>"), Fragment::empty()],
            markers: vec![marker("absent")],
            merged: 0,
        };
        let (rows, _) = compose(&local, "<p>X</p>");

        assert_eq!(rows, vec![AlignedRow::new("<p>A</p>", "<p>X</p>")]);
    }

    #[test]
    fn test_columns_reconstruct_inputs() {
        let local = SlicedDocument {
            fragments: vec![
                Fragment::new("<p>A</p>\n<p>B</p>\n"),
                Fragment::new("<p>C</p>"),
            ],
            markers: vec![marker("gamma")],
            merged: 0,
        };
        let foreign = "<p>alpha</p>\n<p>beta</p>\n<p>gamma</p><p>delta</p>";
        let (rows, _) = compose(&local, foreign);

        let left: String = rows.iter().map(|r| r.left.as_str()).collect();
        let right: String = rows.iter().map(|r| r.right.as_str()).collect();
        assert_eq!(left, "<p>A</p>\n<p>B</p>\n<p>C</p>");
        assert_eq!(right, foreign);
    }
}
