//! StudyBoard Render Library
//!
//! Renderer abstraction for StudyBoard. The built-in implementation records a
//! display list that a platform canvas replays.

mod display_list;
mod renderer;

pub use display_list::{DisplayListRenderer, DrawCommand, Layer};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
