//! Undo/redo history.

use crate::document::ShapeCollection;
use crate::shapes::{Shape, ShapeId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Default number of undo entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A shape before and after one editing gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edit<H> {
    pub before: Shape<H>,
    pub after: Shape<H>,
}

impl<H> Edit<H> {
    pub fn new(before: Shape<H>, after: Shape<H>) -> Self {
        Self { before, after }
    }
}

/// One reversible mutation of the shape collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum HistoryEntry<H> {
    Created(Shape<H>),
    Moved(Edit<H>),
    Resized(Edit<H>),
    Rotated(Edit<H>),
}

impl<H> HistoryEntry<H> {
    /// The shape this entry applies to.
    pub fn shape_id(&self) -> ShapeId {
        match self {
            HistoryEntry::Created(shape) => shape.id(),
            HistoryEntry::Moved(edit) | HistoryEntry::Resized(edit) | HistoryEntry::Rotated(edit) => {
                edit.before.id()
            }
        }
    }
}

impl<H: Clone> HistoryEntry<H> {
    fn revert(&self, shapes: &mut ShapeCollection<H>) -> bool {
        match self {
            HistoryEntry::Created(shape) => shapes.remove(shape.id()).is_some(),
            HistoryEntry::Moved(edit) | HistoryEntry::Resized(edit) | HistoryEntry::Rotated(edit) => {
                shapes.replace(edit.before.clone()).is_some()
            }
        }
    }

    fn apply(&self, shapes: &mut ShapeCollection<H>) -> bool {
        match self {
            HistoryEntry::Created(shape) => {
                if shapes.get(shape.id()).is_some() {
                    return false;
                }
                shapes.push(shape.clone());
                true
            }
            HistoryEntry::Moved(edit) | HistoryEntry::Resized(edit) | HistoryEntry::Rotated(edit) => {
                shapes.replace(edit.after.clone()).is_some()
            }
        }
    }
}

/// Linear undo/redo history over a [`ShapeCollection`].
#[derive(Debug, Clone)]
pub struct History<H> {
    undo_stack: Vec<HistoryEntry<H>>,
    redo_stack: Vec<HistoryEntry<H>>,
    /// Maximum undo entries; 0 keeps everything.
    limit: usize,
}

impl<H> Default for History<H> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl<H> History<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Record that `shape` was appended to the collection.
    pub fn record_create(&mut self, shape: Shape<H>) {
        self.record(HistoryEntry::Created(shape));
    }

    /// Push an entry onto the undo stack. Clears the redo stack.
    pub fn record(&mut self, entry: HistoryEntry<H>) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();

        if self.limit > 0 && self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..excess);
        }
    }
}

impl<H: Clone> History<H> {
    /// Undo the most recent entry.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, shapes: &mut ShapeCollection<H>) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };
        if !entry.revert(shapes) {
            warn!("Dropping undo entry for missing shape {}", entry.shape_id());
            return false;
        }
        debug!("Undid change to shape {}", entry.shape_id());
        self.redo_stack.push(entry);
        true
    }

    /// Redo the last undone entry.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, shapes: &mut ShapeCollection<H>) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        if !entry.apply(shapes) {
            warn!("Dropping redo entry for shape {}", entry.shape_id());
            return false;
        }
        debug!("Redid change to shape {}", entry.shape_id());
        self.undo_stack.push(entry);
        true
    }
}
