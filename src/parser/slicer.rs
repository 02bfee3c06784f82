//! Splitting a document at markers into independently balanced fragments.

use crate::model::{Fragment, Marker};

use super::tags::{OpenStack, TagCatalog, TagKind};

/// Fragments of one document, positionally aligned with its markers.
///
/// `fragments[i]` is the content between `markers[i - 1]` and `markers[i]`,
/// so there is always one more fragment than there are markers. Fragments
/// merged into their successor are left behind as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlicedDocument {
    /// Balanced fragments, `markers.len() + 1` of them
    pub fragments: Vec<Fragment>,

    /// Markers actually used as split points
    pub markers: Vec<Marker>,

    /// Number of fragments merged into their successor
    pub merged: usize,
}

impl SlicedDocument {
    /// Number of fragments with content.
    pub fn non_empty(&self) -> usize {
        self.fragments.iter().filter(|f| !f.is_empty()).count()
    }
}

/// Splits markup at marker offsets and repairs tag balance at every cut.
#[derive(Debug, Clone, Copy)]
pub struct BalancedSlicer<'a> {
    catalog: &'a TagCatalog,
}

impl<'a> BalancedSlicer<'a> {
    /// Create a slicer over the given catalog.
    pub fn new(catalog: &'a TagCatalog) -> Self {
        Self { catalog }
    }

    /// Slice `html` at each marker offset.
    ///
    /// Tags left open at the end of a fragment are closed there and reopened
    /// at the start of the next one, with their original attributes minus
    /// `id`, so ids stay unique. An
    /// interior fragment whose own markup does not close what it opens is
    /// merged forward into the next fragment instead.
    ///
    /// A marker directly preceded by catalog opening tags (`<p>` in
    /// `<p>Hello`) is moved in front of them, so the cut does not leave an
    /// empty element behind.
    pub fn slice(&self, html: &str, markers: &[Marker]) -> SlicedDocument {
        let markers = self.usable_markers(html, markers);
        let mut bounds: Vec<usize> = Vec::with_capacity(markers.len() + 2);
        bounds.push(0);
        bounds.extend(markers.iter().map(|m| m.offset));
        bounds.push(html.len());

        let count = bounds.len() - 1;
        let mut fragments = Vec::with_capacity(count);
        let mut carry = OpenStack::new();
        let mut pending = String::new();
        let mut merged = 0;

        for (i, window) in bounds.windows(2).enumerate() {
            let is_first = i == 0;
            let is_last = i + 1 == count;

            let mut body = std::mem::take(&mut pending);
            body.push_str(&html[window[0]..window[1]]);

            let mut text = carry.reopeners();
            text.push_str(&body);
            let stack = self.scan(&text);

            if is_first || is_last || stack.names() == carry.names() {
                text.push_str(&stack.closers());
                fragments.push(Fragment {
                    html: text,
                    carried: stack.names(),
                });
                carry = stack;
            } else {
                log::debug!(
                    "Fragment {} leaves {} tag(s) open, merging into the next one",
                    i,
                    stack.depth()
                );
                pending = body;
                fragments.push(Fragment::empty());
                merged += 1;
            }
        }

        SlicedDocument {
            fragments,
            markers,
            merged,
        }
    }

    /// Keep markers whose offsets are increasing, in bounds and on character
    /// boundaries, after moving each one in front of adjacent opening tags.
    fn usable_markers(&self, html: &str, markers: &[Marker]) -> Vec<Marker> {
        let mut usable: Vec<Marker> = Vec::with_capacity(markers.len());
        for marker in markers {
            if marker.offset > html.len() || !html.is_char_boundary(marker.offset) {
                log::warn!(
                    "Marker '{}' at byte {} is out of bounds, ignored",
                    marker.anchor_text,
                    marker.offset
                );
                continue;
            }
            let offset = self.snap_back(html, marker.offset);
            if usable.last().map_or(true, |m| offset > m.offset) {
                usable.push(Marker {
                    offset,
                    ..marker.clone()
                });
            } else {
                log::warn!(
                    "Marker '{}' at byte {} is out of order, ignored",
                    marker.anchor_text,
                    marker.offset
                );
            }
        }
        usable
    }

    /// Walk `offset` back over catalog opening tags that end exactly there.
    fn snap_back(&self, html: &str, mut offset: usize) -> usize {
        while html[..offset].ends_with('>') {
            let Some(lt) = html[..offset].rfind('<') else {
                break;
            };
            let tag = &html[lt..offset];
            let is_opener = self
                .catalog
                .tokens(tag)
                .next()
                .is_some_and(|t| t.kind == TagKind::Open && t.start == 0 && t.end == tag.len());
            if !is_opener {
                break;
            }
            offset = lt;
        }
        offset
    }

    fn scan(&self, text: &str) -> OpenStack {
        let mut stack = OpenStack::new();
        for token in self.catalog.tokens(text) {
            if !stack.apply(&token) {
                log::warn!("Stray closing tag </{}> at byte {}", token.name, token.start);
            }
        }
        stack
    }
}
