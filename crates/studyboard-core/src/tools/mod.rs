//! Tool system: turns pointer gestures into primitives ready to commit.

use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};
use crate::geometry::sample;
use crate::shapes::{ArgbColor, Shape, ShapeKind, Stroke};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Shape,
    Text,
}

/// Paint attributes applied to new strokes and shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenStyle {
    pub color: ArgbColor,
    pub width: f64,
}

/// Tool mode together with the state only that mode needs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Pen,
    /// The pen style in effect before the eraser was picked.
    Eraser { saved_pen: PenStyle },
    Shape,
    Text,
}

impl Mode {
    fn kind(&self) -> ToolKind {
        match self {
            Mode::Pen => ToolKind::Pen,
            Mode::Eraser { .. } => ToolKind::Eraser,
            Mode::Shape => ToolKind::Shape,
            Mode::Text => ToolKind::Text,
        }
    }
}

/// A shape being sized by a drag.
#[derive(Debug, Clone, PartialEq)]
struct ShapeDrag {
    origin: Point,
    shape: Shape,
    /// Set once the pointer moved past the touch slop; never reset.
    dragging: bool,
}

/// State of the gesture in progress.
#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Pen or eraser path being accumulated.
    Drawing { path: BezPath },
    /// Shape being placed.
    Sizing(ShapeDrag),
}

/// A primitive produced by a finished gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Stroke(Stroke),
    Shape(Shape),
}

/// In-progress gesture for live rendering.
#[derive(Debug, Clone)]
pub enum Preview {
    Path { path: BezPath, style: PenStyle },
    Shape(Shape),
}

/// Manages the current tool, its style and the gesture in progress.
#[derive(Debug, Clone)]
pub struct ToolManager {
    config: BoardConfig,
    mode: Mode,
    /// Style used for new strokes and shapes in the current mode.
    style: PenStyle,
    /// Geometry used by the shape tool.
    shape_kind: ShapeKind,
    gesture: Gesture,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl ToolManager {
    /// Create a tool manager with the pen selected.
    pub fn new(config: BoardConfig) -> Self {
        let style = PenStyle {
            color: config.default_pen_color,
            width: config.default_pen_width,
        };
        Self {
            config,
            mode: Mode::Pen,
            style,
            shape_kind: ShapeKind::default(),
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn current_tool(&self) -> ToolKind {
        self.mode.kind()
    }

    /// Switch tools. Returns false if `tool` is already selected.
    ///
    /// Any gesture in progress is discarded.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if tool == self.current_tool() {
            return false;
        }

        if let Mode::Eraser { saved_pen } = self.mode {
            self.style = saved_pen;
        }

        self.mode = match tool {
            ToolKind::Pen => Mode::Pen,
            ToolKind::Eraser => {
                let saved_pen = self.style;
                self.style = self.eraser_style(saved_pen);
                Mode::Eraser { saved_pen }
            }
            ToolKind::Shape => Mode::Shape,
            ToolKind::Text => Mode::Text,
        };
        self.gesture = Gesture::Idle;
        true
    }

    fn eraser_style(&self, pen: PenStyle) -> PenStyle {
        PenStyle {
            color: self.config.background_color,
            width: (pen.width * self.config.eraser_width_multiplier)
                .max(self.config.eraser_min_width),
        }
    }

    /// The pen style, which is restored when leaving the eraser.
    pub fn pen_style(&self) -> PenStyle {
        match self.mode {
            Mode::Eraser { saved_pen } => saved_pen,
            _ => self.style,
        }
    }

    /// The style new primitives are drawn with in the current mode.
    pub fn drawing_style(&self) -> PenStyle {
        self.style
    }

    /// Set the pen color. While erasing, this takes effect once the eraser is left.
    pub fn set_color(&mut self, color: ArgbColor) {
        match &mut self.mode {
            Mode::Eraser { saved_pen } => saved_pen.color = color,
            _ => self.style.color = color,
        }
    }

    /// Set the pen width. While erasing, this takes effect once the eraser is left.
    pub fn set_width(&mut self, width: f64) -> BoardResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(BoardError::InvalidArgument(format!(
                "stroke width must be positive, got {width}"
            )));
        }
        match &mut self.mode {
            Mode::Eraser { saved_pen } => saved_pen.width = width,
            _ => self.style.width = width,
        }
        Ok(())
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        self.shape_kind = kind;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Begin a gesture, replacing any gesture in progress.
    ///
    /// Samples with a non-finite coordinate are ignored here and in
    /// [`update`](Self::update) and [`end`](Self::end).
    pub fn begin(&mut self, point: Point) {
        if !accept(point) {
            return;
        }
        self.gesture = match self.mode {
            Mode::Pen | Mode::Eraser { .. } => {
                let mut path = BezPath::new();
                path.move_to(point);
                Gesture::Drawing { path }
            }
            Mode::Shape => Gesture::Sizing(ShapeDrag {
                origin: point,
                shape: Shape::at_point(self.shape_kind, point, self.style.color, self.style.width),
                dragging: false,
            }),
            Mode::Text => Gesture::Idle,
        };
    }

    /// Update the gesture in progress.
    pub fn update(&mut self, point: Point) {
        if !accept(point) {
            return;
        }
        let slop = self.config.touch_slop;
        let square = self.config.enforce_perfect_square;

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { path } => path.line_to(point),
            Gesture::Sizing(drag) => {
                let dx = point.x - drag.origin.x;
                let dy = point.y - drag.origin.y;
                if !drag.dragging && dx.hypot(dy) > slop {
                    drag.dragging = true;
                }
                if !drag.dragging {
                    return;
                }

                let corner = if square && drag.shape.kind == ShapeKind::Square {
                    let side = dx.abs().max(dy.abs());
                    Point::new(
                        drag.origin.x + side.copysign(signum_or_positive(dx)),
                        drag.origin.y + side.copysign(signum_or_positive(dy)),
                    )
                } else {
                    point
                };
                drag.shape = drag.shape.with_far_corner(corner);
            }
        }
    }

    /// End the gesture at `point` and return the primitive to commit, if any.
    ///
    /// Pointer-up and cancel are handled identically. A non-finite `point` still ends
    /// the gesture, using the last accepted sample.
    pub fn end(&mut self, point: Point) -> Option<Commit> {
        if matches!(self.gesture, Gesture::Idle) {
            return None;
        }
        self.update(point);

        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => None,
            Gesture::Drawing { path } => self.finish_stroke(&path),
            Gesture::Sizing(drag) => Some(Commit::Shape(self.finish_shape(drag))),
        }
    }

    fn finish_stroke(&self, path: &BezPath) -> Option<Commit> {
        let points = match sample(path, self.config.sample_step) {
            Ok(points) => points,
            Err(e) => {
                log::warn!("Discarding stroke: {}", e);
                return None;
            }
        };
        if points.is_empty() {
            log::debug!("Discarding empty stroke");
            return None;
        }
        Some(Commit::Stroke(Stroke::new(
            points,
            self.style.color,
            self.style.width,
        )))
    }

    fn finish_shape(&self, drag: ShapeDrag) -> Shape {
        if drag.dragging {
            drag.shape.normalized()
        } else {
            Shape::centered(
                drag.shape.kind,
                drag.origin,
                self.config.default_shape_side,
                drag.shape.color,
                drag.shape.stroke_width,
            )
        }
    }

    /// Drop the gesture in progress without committing anything.
    pub fn abort(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Get the in-progress gesture for live rendering.
    pub fn preview(&self) -> Option<Preview> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Drawing { path } => Some(Preview::Path {
                path: path.clone(),
                style: self.style,
            }),
            Gesture::Sizing(drag) => Some(Preview::Shape(drag.shape.clone())),
        }
    }
}

fn accept(point: Point) -> bool {
    if point.is_finite() {
        true
    } else {
        log::warn!("Ignoring pointer sample {:?}", point);
        false
    }
}

fn signum_or_positive(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_of(commit: Option<Commit>) -> Shape {
        match commit {
            Some(Commit::Shape(shape)) => shape,
            other => panic!("expected a shape, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::default();
        assert_eq!(tm.current_tool(), ToolKind::Pen);

        assert!(tm.set_tool(ToolKind::Shape));
        assert_eq!(tm.current_tool(), ToolKind::Shape);
        assert!(!tm.set_tool(ToolKind::Shape));
    }

    #[test]
    fn test_pen_interaction() {
        let mut tm = ToolManager::default();
        assert!(!tm.is_active());

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());
        tm.update(Point::new(20.0, 0.0));
        assert!(matches!(tm.preview(), Some(Preview::Path { .. })));

        let commit = tm.end(Point::new(20.0, 0.0));
        assert!(!tm.is_active());
        match commit {
            Some(Commit::Stroke(stroke)) => {
                assert_eq!(stroke.len(), 4);
                assert_eq!(stroke.color, ArgbColor::BLACK);
                assert!((stroke.stroke_width - 8.0).abs() < f64::EPSILON);
            }
            other => panic!("expected a stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_tap_with_pen_commits_nothing() {
        let mut tm = ToolManager::default();
        tm.begin(Point::new(5.0, 5.0));
        assert!(tm.end(Point::new(5.0, 5.0)).is_none());
        assert!(!tm.is_active());
    }

    #[test]
    fn test_end_without_begin() {
        let mut tm = ToolManager::default();
        tm.update(Point::new(1.0, 1.0));
        assert!(tm.end(Point::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn test_tool_change_discards_gesture() {
        let mut tm = ToolManager::default();
        tm.begin(Point::new(0.0, 0.0));
        tm.update(Point::new(50.0, 0.0));

        tm.set_tool(ToolKind::Shape);
        assert!(!tm.is_active());
        assert!(tm.end(Point::new(60.0, 0.0)).is_none());
    }

    #[test]
    fn test_eraser_style_and_restore() {
        let mut tm = ToolManager::default();
        tm.set_color(ArgbColor::from_argb(255, 255, 0, 0));
        tm.set_width(4.0).unwrap();

        tm.set_tool(ToolKind::Eraser);
        let erase = tm.drawing_style();
        assert_eq!(erase.color, ArgbColor::WHITE);
        assert!((erase.width - 24.0).abs() < f64::EPSILON);

        tm.set_tool(ToolKind::Pen);
        assert_eq!(
            tm.drawing_style(),
            PenStyle {
                color: ArgbColor::from_argb(255, 255, 0, 0),
                width: 4.0
            }
        );
    }

    #[test]
    fn test_eraser_width_multiplier() {
        let mut tm = ToolManager::default();
        tm.set_width(10.0).unwrap();
        tm.set_tool(ToolKind::Eraser);
        assert!((tm.drawing_style().width - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_change_while_erasing_applies_after() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Eraser);
        let erase = tm.drawing_style();

        tm.set_color(ArgbColor::from_argb(255, 0, 0, 255));
        tm.set_width(3.0).unwrap();
        assert_eq!(tm.drawing_style(), erase);

        tm.set_tool(ToolKind::Shape);
        assert_eq!(tm.drawing_style().color, ArgbColor::from_argb(255, 0, 0, 255));
        assert!((tm.drawing_style().width - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_width() {
        let mut tm = ToolManager::default();
        assert!(tm.set_width(0.0).is_err());
        assert!(tm.set_width(f64::INFINITY).is_err());
        assert!((tm.drawing_style().width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_tap_places_default_square() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Shape);

        tm.begin(Point::new(300.0, 400.0));
        tm.update(Point::new(303.0, 402.0));
        let shape = shape_of(tm.end(Point::new(303.0, 402.0)));

        assert_eq!(shape.kind, ShapeKind::Square);
        assert!((shape.left - 200.0).abs() < f64::EPSILON);
        assert!((shape.top - 300.0).abs() < f64::EPSILON);
        assert!((shape.right - 400.0).abs() < f64::EPSILON);
        assert!((shape.bottom - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_drag_up_left_normalizes() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Shape);

        tm.begin(Point::new(100.0, 100.0));
        tm.update(Point::new(70.0, 70.0));
        tm.update(Point::new(40.0, 40.0));
        let shape = shape_of(tm.end(Point::new(40.0, 40.0)));

        assert!((shape.left - 40.0).abs() < f64::EPSILON);
        assert!((shape.top - 40.0).abs() < f64::EPSILON);
        assert!((shape.right - 100.0).abs() < f64::EPSILON);
        assert!((shape.bottom - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_square_enforced_during_drag() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Shape);

        tm.begin(Point::new(100.0, 100.0));
        tm.update(Point::new(130.0, 40.0));
        match tm.preview() {
            Some(Preview::Shape(shape)) => {
                assert!((shape.right - 160.0).abs() < f64::EPSILON);
                assert!((shape.bottom - 40.0).abs() < f64::EPSILON);
            }
            other => panic!("expected a shape preview, got {other:?}"),
        }

        let shape = shape_of(tm.end(Point::new(130.0, 40.0)));
        assert!((shape.width() - shape.height()).abs() < f64::EPSILON);
        assert!(shape.is_normalized());
    }

    #[test]
    fn test_rect_kind_follows_pointer() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Shape);
        tm.set_shape_kind(ShapeKind::Rect);

        tm.begin(Point::new(10.0, 10.0));
        tm.update(Point::new(110.0, 40.0));
        let shape = shape_of(tm.end(Point::new(110.0, 40.0)));

        assert_eq!(shape.kind, ShapeKind::Rect);
        assert!((shape.width() - 100.0).abs() < f64::EPSILON);
        assert!((shape.height() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_stays_a_drag_after_returning() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Shape);
        tm.set_shape_kind(ShapeKind::Rect);

        tm.begin(Point::new(50.0, 50.0));
        tm.update(Point::new(90.0, 90.0));
        let shape = shape_of(tm.end(Point::new(52.0, 51.0)));

        assert!((shape.width() - 2.0).abs() < f64::EPSILON);
        assert!((shape.height() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_samples_ignored() {
        let mut tm = ToolManager::default();
        tm.begin(Point::new(f64::NAN, 0.0));
        assert!(!tm.is_active());

        tm.begin(Point::new(0.0, 0.0));
        tm.update(Point::new(f64::INFINITY, 0.0));
        tm.update(Point::new(20.0, 0.0));
        match tm.end(Point::new(f64::NAN, f64::NAN)) {
            Some(Commit::Stroke(stroke)) => {
                assert_eq!(stroke.len(), 4);
                assert!(stroke.points.iter().all(|p| p.is_finite()));
            }
            other => panic!("expected a stroke, got {other:?}"),
        }
        assert!(!tm.is_active());
    }

    #[test]
    fn test_text_tool_ignores_pointer() {
        let mut tm = ToolManager::default();
        tm.set_tool(ToolKind::Text);
        tm.begin(Point::new(0.0, 0.0));
        assert!(!tm.is_active());
        assert!(tm.end(Point::new(10.0, 10.0)).is_none());
    }
}
