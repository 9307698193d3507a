//! Drawing primitives stored in a board document.

mod color;
mod rectangle;
mod stroke;
mod text;

pub use color::ArgbColor;
pub use rectangle::{Shape, ShapeKind};
pub use stroke::Stroke;
pub use text::TextItem;

use kurbo::{BezPath, Rect};

/// Common interface of the path-based primitives (strokes and shapes).
pub trait Drawable {
    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the stroke color.
    fn color(&self) -> ArgbColor;

    /// Get the stroke width.
    fn stroke_width(&self) -> f64;
}
