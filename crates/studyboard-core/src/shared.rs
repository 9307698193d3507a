//! Thread-safe handle to a board.

use crate::board::Board;
use crate::document::Document;
use crate::events::BoardEvent;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A [`Board`] shared between the input thread and other consumers.
///
/// Every call takes the lock for its own duration only, so calls from different
/// threads are applied one at a time in lock order.
#[derive(Debug, Clone, Default)]
pub struct SharedBoard {
    inner: Arc<Mutex<Board>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    /// Lock the board for a sequence of calls that must not interleave.
    pub fn lock(&self) -> MutexGuard<'_, Board> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the board.
    pub fn with<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Owned copy of the document, usable without holding the lock.
    pub fn snapshot(&self) -> Document {
        self.inner.lock().snapshot()
    }

    pub fn export_document(&self, pretty: bool) -> String {
        self.inner.lock().export_document(pretty)
    }

    pub fn undo(&self) -> bool {
        self.inner.lock().undo()
    }

    pub fn redo(&self) -> bool {
        self.inner.lock().redo()
    }

    pub fn subscribe(&self) -> Receiver<BoardEvent> {
        self.inner.lock().subscribe()
    }
}

impl From<Board> for SharedBoard {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}
