//! Backend-neutral renderer that records draw commands.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::{Affine, BezPath, PathEl, Point, Rect};
use studyboard_core::shapes::{ArgbColor, Drawable, TextItem};
use studyboard_core::tools::Preview;

/// Paint layer of a command. Layers are emitted in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Shapes,
    Strokes,
    Text,
    Preview,
}

/// A single drawing operation, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: ArgbColor },
    /// Stroke `path` with round caps and joins.
    Path {
        layer: Layer,
        path: BezPath,
        color: ArgbColor,
        width: f64,
    },
    /// Filled circle, used for strokes that consist of a single point.
    Dot {
        layer: Layer,
        center: Point,
        radius: f64,
        color: ArgbColor,
    },
    /// Text drawn with its baseline starting at `origin`.
    Text {
        origin: Point,
        text: String,
        size: f64,
        color: ArgbColor,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> Option<Layer> {
        match self {
            DrawCommand::Clear { .. } => None,
            DrawCommand::Path { layer, .. } | DrawCommand::Dot { layer, .. } => Some(*layer),
            DrawCommand::Text { .. } => Some(Layer::Text),
        }
    }
}

/// Renderer producing an ordered list of [`DrawCommand`]s.
///
/// Paint order is fixed: shapes, then strokes, then text, then the preview.
/// Primitives entirely outside the viewport are skipped.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded by the last frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Record a frame, failing on an unusable context.
    pub fn render(&mut self, ctx: &RenderContext) -> RenderResult<&[DrawCommand]> {
        self.commands.clear();

        if !ctx.scale_factor.is_finite() || ctx.scale_factor <= 0.0 {
            return Err(RendererError::RenderFailed(format!(
                "invalid scale factor {}",
                ctx.scale_factor
            )));
        }

        let transform = Affine::translate(-ctx.viewport.origin().to_vec2())
            .then_scale(ctx.scale_factor);

        let background = self.background_color(ctx).into();
        self.commands.push(DrawCommand::Clear { color: background });

        for shape in &ctx.document.shapes {
            self.push_drawable(shape, Layer::Shapes, ctx.viewport, transform);
        }
        for stroke in &ctx.document.strokes {
            self.push_drawable(stroke, Layer::Strokes, ctx.viewport, transform);
        }
        for text in &ctx.document.texts {
            self.push_text(text, transform, ctx.scale_factor);
        }

        match ctx.preview {
            Some(Preview::Path { path, style }) => self.push_path(
                Layer::Preview,
                path,
                style.color,
                style.width,
                transform,
            ),
            Some(Preview::Shape(shape)) => {
                self.push_drawable(shape, Layer::Preview, ctx.viewport, transform)
            }
            None => {}
        }

        Ok(&self.commands)
    }

    fn push_drawable(
        &mut self,
        item: &impl Drawable,
        layer: Layer,
        viewport: Rect,
        transform: Affine,
    ) {
        let bounds = item.bounds().inflate(item.stroke_width() / 2.0, item.stroke_width() / 2.0);
        if !overlaps(bounds, viewport) {
            return;
        }
        self.push_path(
            layer,
            &item.to_path(),
            item.color(),
            item.stroke_width(),
            transform,
        );
    }

    fn push_path(
        &mut self,
        layer: Layer,
        path: &BezPath,
        color: ArgbColor,
        width: f64,
        transform: Affine,
    ) {
        let scale = transform.as_coeffs()[0];
        match path.elements() {
            [] => {}
            // A lone move-to: draw the pen tip so single taps stay visible.
            [PathEl::MoveTo(center)] => self.commands.push(DrawCommand::Dot {
                layer,
                center: transform * *center,
                radius: width * scale / 2.0,
                color,
            }),
            _ => self.commands.push(DrawCommand::Path {
                layer,
                path: transform * path.clone(),
                color,
                width: width * scale,
            }),
        }
    }

    fn push_text(&mut self, text: &TextItem, transform: Affine, scale: f64) {
        self.commands.push(DrawCommand::Text {
            origin: transform * text.position(),
            text: text.text.clone(),
            size: text.text_size * scale,
            color: text.color,
        });
    }
}

/// Inclusive overlap test, so zero-area items on the viewport edge still count.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        if let Err(e) = self.render(ctx) {
            log::warn!("Skipping frame: {}", e);
        }
    }
}
