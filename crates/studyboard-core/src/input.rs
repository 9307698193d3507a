//! Pointer input delivered by the shell.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One sample of the pointer stream, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// The platform aborted the gesture; handled like `Up`.
    Cancel { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { x, y }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y }
            | PointerEvent::Cancel { x, y } => Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form() {
        let event: PointerEvent = serde_json::from_str(r#"{"phase":"move","x":1.5,"y":2}"#).unwrap();
        assert_eq!(event, PointerEvent::Move { x: 1.5, y: 2.0 });
        assert_eq!(event.position(), Point::new(1.5, 2.0));
    }
}
