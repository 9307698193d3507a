//! Freehand stroke.

use super::{ArgbColor, Drawable};
use crate::geometry::reconstruct_path;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// One committed pen or eraser gesture, already sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Stroke {
    /// Sampled points in drawing order.
    #[serde(with = "wire_points")]
    pub points: Vec<Point>,
    pub color: ArgbColor,
    pub stroke_width: f64,
}

impl Stroke {
    pub fn new(points: Vec<Point>, color: ArgbColor, stroke_width: f64) -> Self {
        Self {
            points,
            color,
            stroke_width,
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Drawable for Stroke {
    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn to_path(&self) -> BezPath {
        reconstruct_path(&self.points)
    }

    fn color(&self) -> ArgbColor {
        self.color
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }
}

/// Points are written as `{"x": .., "y": ..}` objects and read back strictly.
mod wire_points {
    use kurbo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct WirePoint {
        x: f64,
        y: f64,
    }

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer>(points: &Vec<Point>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(points.iter().map(|p| WirePoint { x: p.x, y: p.y }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let points = Vec::<WirePoint>::deserialize(deserializer)?;
        Ok(points.into_iter().map(|p| Point::new(p.x, p.y)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let stroke = Stroke::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            ArgbColor::BLACK,
            4.0,
        );

        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_wire_form() {
        let stroke = Stroke::new(vec![Point::new(1.5, -2.0)], ArgbColor::BLACK, 4.0);
        let json = serde_json::to_string(&stroke).unwrap();
        assert_eq!(
            json,
            r#"{"points":[{"x":1.5,"y":-2.0}],"color":-16777216,"strokeWidth":4.0}"#
        );

        let bad = r#"{"points":[{"x":1.5,"y":-2.0,"z":0}],"color":0,"strokeWidth":4.0}"#;
        assert!(serde_json::from_str::<Stroke>(bad).is_err());
    }

    #[test]
    fn test_single_point_path() {
        let stroke = Stroke::new(vec![Point::new(7.0, 9.0)], ArgbColor::BLACK, 4.0);
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke.to_path().elements().len(), 1);
        assert_eq!(stroke.bounds(), Rect::new(7.0, 9.0, 7.0, 9.0));
    }
}
