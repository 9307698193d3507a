//! Rectangular shapes (square and free rectangle).

use super::{ArgbColor, Drawable};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Tag identifying the geometry of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    /// Square; drags keep both sides equal when square enforcement is on.
    #[default]
    Square,
    /// Axis-aligned rectangle following the pointer freely.
    Rect,
}

/// An edge-based shape primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub color: ArgbColor,
    pub stroke_width: f64,
}

impl Shape {
    /// Create a zero-sized shape at `origin`.
    pub fn at_point(kind: ShapeKind, origin: Point, color: ArgbColor, stroke_width: f64) -> Self {
        Self {
            kind,
            left: origin.x,
            top: origin.y,
            right: origin.x,
            bottom: origin.y,
            color,
            stroke_width,
        }
    }

    /// Create a square of side `side` centered on `center`.
    pub fn centered(
        kind: ShapeKind,
        center: Point,
        side: f64,
        color: ArgbColor,
        stroke_width: f64,
    ) -> Self {
        let half = side / 2.0;
        Self {
            kind,
            left: center.x - half,
            top: center.y - half,
            right: center.x + half,
            bottom: center.y + half,
            color,
            stroke_width,
        }
    }

    /// Return a copy with the far corner moved to `corner`.
    pub fn with_far_corner(&self, corner: Point) -> Self {
        Self {
            right: corner.x,
            bottom: corner.y,
            ..self.clone()
        }
    }

    /// Return a copy with `left <= right` and `top <= bottom`.
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            right: self.left.max(self.right),
            top: self.top.min(self.bottom),
            bottom: self.top.max(self.bottom),
            ..self.clone()
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).abs()
    }

    /// Get the shape as a kurbo Rect (normalized).
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom).abs()
    }
}

impl Drawable for Shape {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn color(&self) -> ArgbColor {
        self.color
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }
}
