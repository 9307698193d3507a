//! Notifications published by the board.

use crate::document::Document;
use crate::tools::ToolKind;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// What changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    StrokeAdded,
    ShapeAdded,
    TextAdded,
    Cleared,
    Replaced,
    Undo,
    Redo,
}

/// Events from the board.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// The document changed. Sent once per change, in order.
    Changed {
        /// Monotonic counter, incremented on every change.
        revision: u64,
        change: Change,
        /// The document right after the change.
        document: Arc<Document>,
    },
    /// A different tool was selected.
    ToolChanged { tool: ToolKind },
}

/// Fan-out of board events to any number of channel subscribers.
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    subscribers: Vec<Sender<BoardEvent>>,
}

impl EventBus {
    pub(crate) fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    /// Deliver `event` to every live subscriber, dropping disconnected ones.
    pub(crate) fn publish(&mut self, event: BoardEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
