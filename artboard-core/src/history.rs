//! Snapshot undo/redo ledger.
//!
//! ```text
//! entries: [ s0 ][ s1 ][ s2 ][ s3 ]
//!                       ▲
//!                     cursor      undo ◀─┴─▶ redo
//! ```
//!
//! Snapshots are shared through `Arc`, so a gesture's start scene and the
//! ledger entry it came from are the same allocation.

use std::sync::Arc;

use tracing::debug;

use crate::scene::Scene;

/// Linear undo/redo history of scene snapshots.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Arc<Scene>>,
    cursor: usize,
    limit: Option<usize>,
}

impl History {
    /// Start a history holding only `initial`.
    #[must_use]
    pub fn new(initial: Scene) -> Self {
        Self {
            entries: vec![Arc::new(initial)],
            cursor: 0,
            limit: None,
        }
    }

    /// Start a history that keeps at most `limit` entries (minimum 1).
    #[must_use]
    pub fn with_limit(initial: Scene, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial)
        }
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &Arc<Scene> {
        &self.entries[self.cursor]
    }

    /// Replace the snapshot at the cursor without creating an undo step.
    pub fn set_live(&mut self, scene: Scene) {
        self.entries[self.cursor] = Arc::new(scene);
    }

    /// Record a new snapshot after the cursor, discarding any redo entries.
    pub fn commit(&mut self, scene: Scene) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Arc::new(scene));
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
                self.cursor -= excess;
            }
        }
        debug!(len = self.entries.len(), cursor = self.cursor, "history commit");
    }

    /// Step back one snapshot. Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "undo");
        true
    }

    /// Step forward one snapshot. Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "redo");
        true
    }

    /// Whether there is an earlier snapshot.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether there is a later snapshot.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn scene_with(n: usize) -> Scene {
        (0..n).map(|_| Element::rect(0.0, 0.0, 1.0, 1.0)).collect()
    }

    #[test]
    fn test_commit_undo_redo() {
        let mut history = History::new(Scene::new());
        let a = scene_with(1);
        let b = scene_with(2);

        history.commit(a.clone());
        history.commit(b.clone());
        assert_eq!(history.len(), 3);

        assert!(history.undo());
        assert_eq!(**history.current(), a);
        assert!(history.redo());
        assert_eq!(**history.current(), b);
        assert!(!history.redo());
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let mut history = History::new(Scene::new());
        history.commit(scene_with(1));
        history.commit(scene_with(2));
        history.undo();

        let c = scene_with(3);
        history.commit(c.clone());
        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(**history.current(), c);
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = History::new(Scene::new());
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_set_live_replaces_current() {
        let mut history = History::new(Scene::new());
        history.set_live(scene_with(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().len(), 2);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Scene::new(), 3);
        for n in 1..=5 {
            history.commit(scene_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().len(), 5);
        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().len(), 3);
    }
}
