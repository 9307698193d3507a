//! Renderer trait abstraction.

use kurbo::Rect;
use peniko::Color;
use studyboard_core::document::Document;
use studyboard_core::tools::Preview;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// The document to render.
    pub document: &'a Document,
    /// Gesture in progress, painted above everything else.
    pub preview: Option<&'a Preview>,
    /// Visible part of the canvas, in canvas coordinates.
    pub viewport: Rect,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a context showing the whole canvas of `document`.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            preview: None,
            viewport: Rect::new(
                0.0,
                0.0,
                f64::from(document.width()),
                f64::from(document.height()),
            ),
            scale_factor: 1.0,
            background_color: Color::WHITE,
        }
    }

    /// Set the in-progress gesture.
    pub fn with_preview(mut self, preview: Option<&'a Preview>) -> Self {
        self.preview = preview;
        self
    }

    /// Restrict drawing to the part of the canvas inside `viewport`.
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// Backends read the document through the context and never modify it.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }

    /// Rasterize the whole document to PNG bytes.
    fn export_png(&mut self, _ctx: &RenderContext) -> RenderResult<Vec<u8>> {
        Err(RendererError::Unsupported(
            "this renderer cannot rasterize".to_string(),
        ))
    }
}
