//! Conversion between freehand gestures and stored point sequences.
//!
//! A gesture is accumulated as a [`BezPath`] while the pointer moves. On commit the
//! path is walked by arc length in fixed increments so that strokes are stored with
//! an even point density regardless of how fast the input device reported samples.

use crate::error::{BoardError, BoardResult};
use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathEl, PathSeg, Point};

/// Default arc-length distance between two sampled points.
pub const DEFAULT_SAMPLE_STEP: f64 = 5.0;

/// Accuracy used when measuring curved segments.
const ARCLEN_ACCURACY: f64 = 1e-6;

/// Sample `path` every `step` units of arc length.
///
/// Each contour (sub-path started by a move-to) is walked independently and emits
/// the points at distances `0, step, 2 * step, ...` strictly below its length, so a
/// zero-length contour contributes nothing.
pub fn sample(path: &BezPath, step: f64) -> BoardResult<Vec<Point>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(BoardError::InvalidArgument(format!(
            "sampling step must be a positive number, got {step}"
        )));
    }

    let mut points = Vec::new();
    for contour in contours(path) {
        sample_contour(&contour, step, &mut points);
    }
    Ok(points)
}

fn sample_contour(contour: &BezPath, step: f64, out: &mut Vec<Point>) {
    let segments: Vec<PathSeg> = contour.segments().collect();
    let lengths: Vec<f64> = segments
        .iter()
        .map(|seg| seg.arclen(ARCLEN_ACCURACY))
        .collect();
    let total: f64 = lengths.iter().sum();

    let mut index = 0;
    let mut segment_start = 0.0;

    // Distances are multiples of `step` so rounding does not accumulate.
    for n in 0u32.. {
        let distance = f64::from(n) * step;
        if distance >= total {
            break;
        }
        while index + 1 < segments.len() && segment_start + lengths[index] < distance {
            segment_start += lengths[index];
            index += 1;
        }

        let segment = segments[index];
        let length = lengths[index];
        let local = (distance - segment_start).clamp(0.0, length);
        let t = if local > 0.0 {
            segment.inv_arclen(local, ARCLEN_ACCURACY)
        } else {
            0.0
        };
        out.push(segment.eval(t));
    }
}

/// Split a path into its contours.
fn contours(path: &BezPath) -> Vec<BezPath> {
    let mut result = Vec::new();
    let mut current: Vec<PathEl> = Vec::new();

    for el in path.elements() {
        if matches!(el, PathEl::MoveTo(_)) && !current.is_empty() {
            result.push(BezPath::from_vec(std::mem::take(&mut current)));
        }
        current.push(*el);
    }
    if !current.is_empty() {
        result.push(BezPath::from_vec(current));
    }
    result
}

/// Build a polyline through `points`, in order.
///
/// An empty slice yields an empty path, which renders as nothing.
pub fn reconstruct_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();

    let Some((first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}
