//! Undo/redo history over stroke-list snapshots.
//!
//! # Responsibility
//! - Keep the ordered snapshot stack and cursor for one drawing session.
//!
//! # Invariants
//! - `0 <= cursor < len` whenever the history is non-empty.
//! - `can_undo <=> cursor > 0`; `can_redo <=> cursor < len - 1`.
//! - A push truncates every snapshot after the cursor before appending;
//!   linear undo only, no branching.

use crate::ink::strokes::Stroke;
use std::sync::Arc;

/// One immutable stroke-list state, shared cheaply across history, the
/// visible-strokes stream and the background saver.
pub type StrokeSnapshot = Arc<Vec<Stroke>>;

/// Snapshot stack plus cursor.
#[derive(Default)]
pub struct StrokeHistory {
    snapshots: Vec<StrokeSnapshot>,
    cursor: usize,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor < self.snapshots.len() - 1
    }

    /// Snapshot the cursor currently points at.
    pub fn current(&self) -> Option<StrokeSnapshot> {
        self.snapshots.get(self.cursor).cloned()
    }

    /// Seeds the history with the persisted strokes of a freshly opened
    /// note. Only meaningful on an empty history; a live session keeps its
    /// stack and the caller re-publishes `current()` instead.
    pub fn load(&mut self, strokes: Vec<Stroke>) -> StrokeSnapshot {
        debug_assert!(self.snapshots.is_empty());
        let snapshot = Arc::new(strokes);
        self.snapshots.clear();
        self.snapshots.push(Arc::clone(&snapshot));
        self.cursor = 0;
        snapshot
    }

    /// Appends a new snapshot, discarding any redo tail.
    ///
    /// A push onto an empty history first materializes the implicit empty
    /// baseline so the edit itself stays undoable.
    pub fn push(&mut self, strokes: Vec<Stroke>) -> StrokeSnapshot {
        if self.snapshots.is_empty() {
            self.snapshots.push(Arc::new(Vec::new()));
            self.cursor = 0;
        }

        self.snapshots.truncate(self.cursor + 1);
        let snapshot = Arc::new(strokes);
        self.snapshots.push(Arc::clone(&snapshot));
        self.cursor += 1;
        snapshot
    }

    /// Moves the cursor back one snapshot.
    pub fn undo(&mut self) -> Option<StrokeSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Moves the cursor forward one snapshot.
    pub fn redo(&mut self) -> Option<StrokeSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::StrokeHistory;
    use crate::ink::brush::{Brush, BrushFamily, Color, StockBrush};
    use crate::ink::strokes::{Stroke, StrokeInputBatch};

    fn stroke() -> Stroke {
        Stroke::new(
            Brush::new(
                BrushFamily::Stock(StockBrush::Marker),
                Color::BLACK,
                5.0,
                0.1,
            ),
            StrokeInputBatch::empty(),
        )
    }

    #[test]
    fn push_on_empty_materializes_the_empty_baseline() {
        let mut history = StrokeHistory::new();
        history.push(vec![stroke()]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn n_appends_then_n_undos_restore_the_initial_snapshot() {
        let mut history = StrokeHistory::new();
        history.load(Vec::new());
        for i in 1..=4 {
            let strokes = std::iter::repeat_with(stroke).take(i).collect();
            history.push(strokes);
        }
        for _ in 0..4 {
            assert!(history.undo().is_some());
        }
        assert!(!history.can_undo());
        assert!(history.current().unwrap().is_empty());
    }

    #[test]
    fn push_after_undo_discards_the_redo_tail() {
        let mut history = StrokeHistory::new();
        history.load(Vec::new());
        history.push(vec![stroke()]);
        history.push(vec![stroke(), stroke()]);
        history.undo().unwrap();
        assert!(history.can_redo());

        history.push(vec![stroke(), stroke(), stroke()]);
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().unwrap().len(), 3);
    }

    #[test]
    fn undo_and_redo_saturate_at_the_ends() {
        let mut history = StrokeHistory::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        history.load(vec![stroke()]);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.current().unwrap().len(), 1);
    }
}
