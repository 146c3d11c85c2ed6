//! Stroke store: committed strokes in drawing order plus the redo buffer.

use crate::stroke::{Stroke, StrokeId};
use std::collections::HashMap;
use uuid::Uuid;

/// Owns every committed stroke.
///
/// Strokes are kept in an id-keyed arena with a separate drawing order, so
/// selections can hold [`StrokeId`]s and mutate strokes in place.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    strokes: HashMap<StrokeId, Stroke>,
    /// Drawing order (back to front).
    order: Vec<StrokeId>,
    /// Undone strokes, most recent last.
    redo_buffer: Vec<(StrokeId, Stroke)>,
}

impl StrokeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke and drop any redo history.
    pub fn commit(&mut self, stroke: Stroke) -> StrokeId {
        let id = self.push(stroke);
        self.redo_buffer.clear();
        id
    }

    fn push(&mut self, stroke: Stroke) -> StrokeId {
        let id = Uuid::new_v4();
        self.order.push(id);
        self.strokes.insert(id, stroke);
        id
    }

    /// Move the most recent stroke into the redo buffer.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(id) = self.order.pop() else {
            return false;
        };
        match self.strokes.remove(&id) {
            Some(stroke) => {
                self.redo_buffer.push((id, stroke));
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone stroke.
    /// Returns false if the redo buffer was empty.
    pub fn redo(&mut self) -> bool {
        let Some((id, stroke)) = self.redo_buffer.pop() else {
            return false;
        };
        self.order.push(id);
        self.strokes.insert(id, stroke);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.order.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Remove strokes by handle. The redo buffer is left as it is, so these
    /// removals are not undoable. Returns how many strokes were removed.
    pub fn delete_strokes(&mut self, ids: &[StrokeId]) -> usize {
        let before = self.order.len();
        self.order.retain(|id| !ids.contains(id));
        for id in ids {
            self.strokes.remove(id);
        }
        before - self.order.len()
    }

    /// Replace the whole collection (programmatic load). Clears redo history.
    pub fn replace_all(&mut self, strokes: Vec<Stroke>) -> Vec<StrokeId> {
        self.strokes.clear();
        self.order.clear();
        self.redo_buffer.clear();
        strokes.into_iter().map(|s| self.push(s)).collect()
    }

    /// Drop every stroke and the redo history.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.order.clear();
        self.redo_buffer.clear();
    }

    /// Get a committed stroke by handle.
    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(&id)
    }

    /// Get a mutable reference to a committed stroke.
    pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.get_mut(&id)
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.strokes.contains_key(&id)
    }

    /// Handles in drawing order.
    pub fn ids(&self) -> &[StrokeId] {
        &self.order
    }

    /// Strokes in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.order.iter().filter_map(|id| self.strokes.get(id))
    }

    /// Handles paired with strokes, in drawing order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (StrokeId, &Stroke)> {
        self.order
            .iter()
            .filter_map(|id| self.strokes.get(id).map(|s| (*id, s)))
    }

    /// Owned copy of the strokes in drawing order.
    pub fn to_vec(&self) -> Vec<Stroke> {
        self.iter().cloned().collect()
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_buffer.len()
    }
}
