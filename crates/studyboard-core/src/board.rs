//! The board: document, history and tools behind one single-owner API.

use crate::config::BoardConfig;
use crate::document::{Document, History};
use crate::error::{BoardError, BoardResult};
use crate::events::{BoardEvent, Change, EventBus};
use crate::input::PointerEvent;
use crate::serialization;
use crate::shapes::{ArgbColor, ShapeKind, TextItem};
use crate::tools::{Commit, PenStyle, Preview, ToolKind, ToolManager};
use kurbo::Point;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// Interactive drawing board.
///
/// Pointer events must be fed in arrival order. Every mutation records the
/// previous document in the undo history first, and publishes a
/// [`BoardEvent::Changed`] afterwards.
#[derive(Debug)]
pub struct Board {
    document: Document,
    history: History,
    tools: ToolManager,
    events: EventBus,
    revision: u64,
}

impl Default for Board {
    fn default() -> Self {
        let config = BoardConfig::default();
        Self {
            document: Document::new(config.canvas_width, config.canvas_height),
            history: History::new(config.history_limit),
            tools: ToolManager::new(config),
            events: EventBus::default(),
            revision: 0,
        }
    }
}

impl Board {
    /// Create an empty board, validating `config` first.
    pub fn new(config: BoardConfig) -> BoardResult<Self> {
        config.validate()?;
        Ok(Self {
            document: Document::new(config.canvas_width, config.canvas_height),
            history: History::new(config.history_limit),
            tools: ToolManager::new(config),
            events: EventBus::default(),
            revision: 0,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        self.tools.config()
    }

    // --- Tools and style ---

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool()
    }

    /// Select a tool. Selecting the current tool does nothing.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tools.set_tool(tool) {
            log::debug!("Tool changed to {:?}", tool);
            self.events.publish(BoardEvent::ToolChanged { tool });
        }
    }

    pub fn pen_style(&self) -> PenStyle {
        self.tools.pen_style()
    }

    pub fn drawing_style(&self) -> PenStyle {
        self.tools.drawing_style()
    }

    pub fn set_stroke_color(&mut self, color: ArgbColor) {
        self.tools.set_color(color);
    }

    pub fn set_stroke_width(&mut self, width: f64) -> BoardResult<()> {
        self.tools.set_width(width).inspect_err(|e| log::warn!("{}", e))
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.tools.shape_kind()
    }

    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        self.tools.set_shape_kind(kind);
    }

    /// Record the canvas size. This is export metadata and is not undoable.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.document.set_size(width, height);
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, point: Point) {
        self.tools.begin(point);
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.tools.update(point);
    }

    pub fn pointer_up(&mut self, point: Point) {
        if let Some(commit) = self.tools.end(point) {
            self.commit(commit);
        }
    }

    pub fn pointer_cancel(&mut self, point: Point) {
        self.pointer_up(point);
    }

    /// Dispatch one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let point = event.position();
        match event {
            PointerEvent::Down { .. } => self.pointer_down(point),
            PointerEvent::Move { .. } => self.pointer_move(point),
            PointerEvent::Up { .. } => self.pointer_up(point),
            PointerEvent::Cancel { .. } => self.pointer_cancel(point),
        }
    }

    /// The gesture in progress, if any.
    pub fn preview(&self) -> Option<Preview> {
        self.tools.preview()
    }

    fn commit(&mut self, commit: Commit) {
        self.history.checkpoint(&self.document);
        let change = match commit {
            Commit::Stroke(stroke) => {
                log::debug!("Committed stroke with {} points", stroke.len());
                self.document.strokes.push(stroke);
                Change::StrokeAdded
            }
            Commit::Shape(shape) => {
                log::debug!("Committed {:?} at {:?}", shape.kind, shape.as_rect());
                self.document.shapes.push(shape);
                Change::ShapeAdded
            }
        };
        self.publish(change);
    }

    // --- Text ---

    /// Add a text annotation anchored at (`x`, `y`).
    ///
    /// A missing `x` centers the text horizontally; a missing `y` puts the baseline
    /// half the text size below the vertical center. Blank content or a non-finite
    /// anchor is ignored and returns false.
    pub fn add_text(&mut self, content: &str, x: Option<f64>, y: Option<f64>) -> bool {
        let text_size = self.config().default_text_size;
        let position = Point::new(
            x.unwrap_or(f64::from(self.document.width()) / 2.0),
            y.unwrap_or(f64::from(self.document.height()) / 2.0 + text_size / 2.0),
        );
        let item = TextItem::new(position, content, self.tools.pen_style().color, text_size);

        if item.is_blank() {
            log::debug!("Ignoring blank text");
            return false;
        }
        if !position.is_finite() {
            log::warn!("Ignoring text at {:?}", position);
            return false;
        }

        self.history.checkpoint(&self.document);
        self.document.texts.push(item);
        self.publish(Change::TextAdded);
        true
    }

    // --- History ---

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.document) {
            log::debug!("Nothing to undo");
            return false;
        }
        self.tools.abort();
        self.publish(Change::Undo);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.document) {
            log::debug!("Nothing to redo");
            return false;
        }
        self.tools.abort();
        self.publish(Change::Redo);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Remove every primitive. Undoable.
    pub fn clear(&mut self) {
        self.history.checkpoint(&self.document);
        self.document.clear();
        self.tools.abort();
        self.publish(Change::Cleared);
    }

    /// Replace the whole document, e.g. with an imported one. Undoable.
    pub fn replace_document(&mut self, document: Document) {
        self.history.checkpoint(&self.document);
        self.document = document;
        self.tools.abort();
        self.publish(Change::Replaced);
    }

    /// Decode `text` and make it the current document.
    pub fn import_document(&mut self, text: &str) -> BoardResult<()> {
        let document = serialization::decode(text)?;
        self.replace_document(document);
        Ok(())
    }

    // --- Observation and export ---

    /// Read-only view of the current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Owned copy of the current document.
    pub fn snapshot(&self) -> Document {
        self.document.clone()
    }

    /// Number of changes applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive a [`BoardEvent`] for every later change, in order.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Encode the current document.
    pub fn export_document(&self, pretty: bool) -> String {
        serialization::encode(&self.document, pretty)
    }

    fn publish(&mut self, change: Change) {
        self.revision += 1;
        if self.events.has_subscribers() {
            self.events.publish(BoardEvent::Changed {
                revision: self.revision,
                change,
                document: Arc::new(self.document.clone()),
            });
        }
    }
}

impl TryFrom<BoardConfig> for Board {
    type Error = BoardError;

    fn try_from(config: BoardConfig) -> BoardResult<Self> {
        Board::new(config)
    }
}
