//! StudyBoard Core Library
//!
//! Platform-agnostic board engine for the StudyBoard whiteboard: tools and gestures,
//! the document model with undo/redo, the JSON interchange format and storage.

pub mod board;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod serialization;
pub mod shapes;
pub mod shared;
pub mod storage;
pub mod tools;

pub use board::Board;
pub use config::{BoardConfig, ConfigError};
pub use document::{Document, History};
pub use error::{BoardError, BoardResult};
pub use events::{BoardEvent, Change};
pub use geometry::{DEFAULT_SAMPLE_STEP, reconstruct_path, sample};
pub use input::PointerEvent;
pub use serialization::{decode, encode};
pub use shapes::{ArgbColor, Drawable, Shape, ShapeKind, Stroke, TextItem};
pub use shared::SharedBoard;
pub use tools::{Commit, PenStyle, Preview, ToolKind, ToolManager};
