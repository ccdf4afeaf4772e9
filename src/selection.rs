//! Multi-object selection and its coupling to the active colors.
//!
//! Selecting objects makes the "anchor" object's stroke/fill the active
//! colors. The colors that were active before the first object was selected
//! are kept in a snapshot and restored verbatim when the selection becomes
//! empty again, no matter how many color edits happened in between.
//!
//! Invariant: the snapshot is `Some` exactly when the selection is non-empty.

use log::debug;

use crate::color::ColorPair;
use crate::document::Document;
use crate::element::ObjectId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<ObjectId>,
    color_snapshot: Option<ColorPair>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order; the last one is the anchor.
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.ids.contains(id)
    }

    pub fn anchor(&self) -> Option<&ObjectId> {
        self.ids.last()
    }

    /// Colors that were active before this selection episode began.
    pub fn color_snapshot(&self) -> Option<ColorPair> {
        self.color_snapshot
    }

    /// Select exactly `id`, or clear the selection when `id` is `None`.
    /// Unknown ids are ignored.
    pub fn select(&mut self, id: Option<&ObjectId>, document: &Document, colors: &mut ColorPair) {
        let Some(id) = id else {
            self.clear(colors);
            return;
        };
        let Some(anchor) = document.get(id).map(|o| o.colors()) else {
            debug!("Ignoring selection of unknown object {id}");
            return;
        };
        self.ids = vec![id.clone()];
        self.sync_anchor(anchor, colors);
    }

    /// Flip membership of `id`. Removing the last selected id behaves like
    /// [`Selection::clear`]; otherwise the active colors follow the new anchor.
    pub fn toggle(&mut self, id: &ObjectId, document: &Document, colors: &mut ColorPair) {
        if let Some(index) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(index);
            let anchor = self
                .ids
                .last()
                .and_then(|last| document.get(last))
                .map(|o| o.colors());
            match anchor {
                Some(anchor) => self.sync_anchor(anchor, colors),
                None if self.ids.is_empty() => self.clear(colors),
                None => {}
            }
        } else {
            let Some(anchor) = document.get(id).map(|o| o.colors()) else {
                debug!("Ignoring toggle of unknown object {id}");
                return;
            };
            self.ids.push(id.clone());
            self.sync_anchor(anchor, colors);
        }
    }

    /// Replace the selection with `ids` (unknown ids are skipped). The last
    /// id becomes the anchor. An empty result clears the selection.
    pub fn select_many(&mut self, ids: &[ObjectId], document: &Document, colors: &mut ColorPair) {
        let known: Vec<ObjectId> = ids.iter().filter(|id| document.contains(id)).cloned().collect();
        let anchor = known.last().and_then(|id| document.get(id)).map(|o| o.colors());
        match anchor {
            Some(anchor) => {
                self.ids = known;
                self.sync_anchor(anchor, colors);
            }
            None => self.clear(colors),
        }
    }

    /// Empty the selection and restore the pre-selection colors.
    pub fn clear(&mut self, colors: &mut ColorPair) {
        self.ids.clear();
        if let Some(snapshot) = self.color_snapshot.take() {
            *colors = snapshot;
        }
    }

    /// Drop ids that no longer exist in `document` (after undo, redo or
    /// removal). Restores colors if nothing remains selected.
    pub fn retain_existing(&mut self, document: &Document, colors: &mut ColorPair) {
        self.ids.retain(|id| document.contains(id));
        if self.ids.is_empty() {
            self.clear(colors);
        }
    }

    /// Forget the selection and the snapshot without touching the active
    /// colors. Used when a whole project is replaced.
    pub fn reset(&mut self) {
        self.ids.clear();
        self.color_snapshot = None;
    }

    fn sync_anchor(&mut self, anchor: ColorPair, colors: &mut ColorPair) {
        if self.color_snapshot.is_none() {
            self.color_snapshot = Some(*colors);
        }
        *colors = anchor;
    }
}
