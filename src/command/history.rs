use std::collections::VecDeque;

use log::debug;

use crate::document::{Document, Snapshot};

/// Maximum number of entries kept in the human-readable action log.
pub const MAX_LOG_ENTRIES: usize = 50;

/// Snapshot-based undo/redo history with a bounded action log.
///
/// `past` holds snapshots older than the current document (most recent at
/// the end), `future` holds snapshots newer than it (next redo at the front).
/// The log is most-recent-first; its first `undo_count` entries describe
/// actions that are currently undone.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Snapshot>,
    future: VecDeque<Snapshot>,
    log: VecDeque<String>,
    undo_count: usize,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history whose log holds a single entry, e.g. "New Project".
    pub fn with_entry(entry: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.log.push_front(entry.into());
        history
    }

    /// Record a completed mutation.
    ///
    /// `previous` is the document as it was before the mutation. Any redo
    /// chain is discarded, the undone log entries are dropped, and the new
    /// description is prepended.
    pub fn record(&mut self, previous: Snapshot, description: impl Into<String>) {
        let description = description.into();
        debug!("History: {description}");

        self.past.push(previous);
        self.future.clear();

        let stale = self.undo_count.min(self.log.len());
        self.log.drain(..stale);
        self.log.push_front(description);
        self.log.truncate(MAX_LOG_ENTRIES);
        self.undo_count = 0;
    }

    /// Step back one snapshot. Returns false (and changes nothing) if there
    /// is nothing to undo.
    pub fn undo(&mut self, current: &mut Document) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(current, previous);
        self.future.push_front(undone);
        self.undo_count = (self.undo_count + 1).min(self.log.len());
        true
    }

    /// Step forward one snapshot. Returns false (and changes nothing) if
    /// there is nothing to redo.
    pub fn redo(&mut self, current: &mut Document) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let redone = std::mem::replace(current, next);
        self.past.push(redone);
        self.undo_count = self.undo_count.saturating_sub(1);
        true
    }

    /// Drop all snapshots and restart the log with a single entry.
    pub fn reset(&mut self, entry: impl Into<String>) {
        *self = Self::with_entry(entry);
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past(&self) -> &[Snapshot] {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<Snapshot> {
        &self.future
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Log entries, most recent first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Number of leading log entries that are currently undone.
    pub fn undo_count(&self) -> usize {
        self.undo_count
    }

    /// Whether the log entry at `index` (0 = most recent) is undone.
    pub fn is_undone(&self, index: usize) -> bool {
        index < self.undo_count
    }
}
