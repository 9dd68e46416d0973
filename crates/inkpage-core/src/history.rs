//! Bounded undo/redo over whole-document snapshots.

use crate::document::Document;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Undo and redo stacks of full [`Document`] snapshots.
///
/// Committed strokes never change in place except through a recorded
/// gesture, so whole-document snapshots are enough.
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest snapshot first.
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
    /// Snapshots evicted by the latest `push`, restored by `discard_last`.
    evicted: Vec<Document>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default bound.
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    /// Create an empty history keeping at most `limit` undo states.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            evicted: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Push current state to undo stack (call before making changes).
    pub fn push(&mut self, document: &Document) {
        self.undo_stack.push(document.clone());

        // Clear redo stack when new changes are made
        self.redo_stack.clear();

        self.evicted = self.evict();
    }

    /// Drop the most recent snapshot without touching the document.
    ///
    /// Used when a recorded gesture turns out to change nothing. Snapshots
    /// the matching `push` evicted are put back, so the stack is left as it
    /// was before that push.
    pub fn discard_last(&mut self) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;
        let evicted = std::mem::take(&mut self.evicted);
        self.undo_stack.splice(..0, evicted);
        Some(snapshot)
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.evicted.clear();
        let current = std::mem::replace(document, snapshot);
        self.redo_stack.push(current);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(document, snapshot);
        self.undo_stack.push(current);
        self.evicted.clear();
        self.evict();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo states held.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo states held.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo snapshots, oldest first.
    pub fn undo_snapshots(&self) -> &[Document] {
        &self.undo_stack
    }

    fn evict(&mut self) -> Vec<Document> {
        if self.undo_stack.len() <= self.limit {
            return Vec::new();
        }
        let excess = self.undo_stack.len() - self.limit;
        self.undo_stack.drain(..excess).collect()
    }
}
