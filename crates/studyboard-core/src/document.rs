//! Board document and its undo/redo history.

use crate::shapes::{Shape, Stroke, TextItem};
use serde::{Deserialize, Deserializer, Serialize};

/// Smallest canvas dimension a document may carry.
pub const MIN_DIMENSION: u32 = 1;

/// The complete serializable state of a board.
///
/// Each sequence is kept in commit order. Rendering paints shapes first, then
/// strokes, then text, regardless of the order in which they were committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub strokes: Vec<Stroke>,
    pub texts: Vec<TextItem>,
    pub shapes: Vec<Shape>,
    #[serde(default = "min_dimension", deserialize_with = "dimension")]
    width: u32,
    #[serde(default = "min_dimension", deserialize_with = "dimension")]
    height: u32,
}

fn min_dimension() -> u32 {
    MIN_DIMENSION
}

/// Missing, null or non-positive dimensions fall back to [`MIN_DIMENSION`].
fn dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.map_or(MIN_DIMENSION, clamp_dimension))
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(i64::from(MIN_DIMENSION), i64::from(u32::MAX)) as u32
}

impl Default for Document {
    fn default() -> Self {
        Self::new(MIN_DIMENSION, MIN_DIMENSION)
    }
}

impl Document {
    /// Create an empty document for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            strokes: Vec::new(),
            texts: Vec::new(),
            shapes: Vec::new(),
            width: width.max(MIN_DIMENSION),
            height: height.max(MIN_DIMENSION),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Update the canvas size recorded in the document.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(MIN_DIMENSION);
        self.height = height.max(MIN_DIMENSION);
    }

    /// Clear all primitives, keeping the canvas size.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.texts.clear();
        self.shapes.clear();
    }

    /// Check if the document has no primitives.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.texts.is_empty() && self.shapes.is_empty()
    }

    /// Total number of primitives.
    pub fn len(&self) -> usize {
        self.strokes.len() + self.texts.len() + self.shapes.len()
    }
}

/// Linear undo/redo history of full document snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
    /// Maximum number of undo states to keep (`None` = unbounded).
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record `current` before it is mutated. Clears the redo stack.
    pub fn checkpoint(&mut self, current: &Document) {
        self.undo_stack.push(current.clone());
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
    }

    /// Step back one state.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, current: &mut Document) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let previous = std::mem::replace(current, snapshot);
            self.redo_stack.push(previous);
            true
        } else {
            false
        }
    }

    /// Step forward one state.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, current: &mut Document) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let previous = std::mem::replace(current, snapshot);
            self.undo_stack.push(previous);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}
