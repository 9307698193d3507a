//! Board scripts: recorded sequences of board operations.
//!
//! A script is a JSON array of steps tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "width", "width": 4 },
//!   { "op": "down", "x": 10, "y": 10 },
//!   { "op": "move", "x": 60, "y": 10 },
//!   { "op": "up", "x": 60, "y": 10 },
//!   { "op": "text", "text": "Homework" }
//! ]
//! ```

use crate::AppError;
use serde::Deserialize;
use studyboard_core::{ArgbColor, Board, PointerEvent, ShapeKind, ToolKind};

/// One board operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScriptStep {
    Tool { tool: ToolKind },
    Color { color: ArgbColor },
    Width { width: f64 },
    ShapeKind { kind: ShapeKind },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel { x: f64, y: f64 },
    Text {
        text: String,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    Undo,
    Redo,
    Clear,
    Canvas { width: u32, height: u32 },
}

/// Parse a script.
pub fn parse(text: &str) -> Result<Vec<ScriptStep>, AppError> {
    serde_json::from_str(text).map_err(AppError::Script)
}

/// Apply one step to `board`.
pub fn apply(board: &mut Board, step: &ScriptStep) -> Result<(), AppError> {
    match step {
        ScriptStep::Tool { tool } => board.set_tool(*tool),
        ScriptStep::Color { color } => board.set_stroke_color(*color),
        ScriptStep::Width { width } => board.set_stroke_width(*width)?,
        ScriptStep::ShapeKind { kind } => board.set_shape_kind(*kind),
        ScriptStep::Down { x, y } => board.handle_pointer(PointerEvent::Down { x: *x, y: *y }),
        ScriptStep::Move { x, y } => board.handle_pointer(PointerEvent::Move { x: *x, y: *y }),
        ScriptStep::Up { x, y } => board.handle_pointer(PointerEvent::Up { x: *x, y: *y }),
        ScriptStep::Cancel { x, y } => {
            board.handle_pointer(PointerEvent::Cancel { x: *x, y: *y })
        }
        ScriptStep::Text { text, x, y } => {
            if !board.add_text(text, *x, *y) {
                log::warn!("Skipped text step {:?}", text);
            }
        }
        ScriptStep::Undo => {
            board.undo();
        }
        ScriptStep::Redo => {
            board.redo();
        }
        ScriptStep::Clear => board.clear(),
        ScriptStep::Canvas { width, height } => board.set_canvas_size(*width, *height),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_parse_steps() {
        let steps = parse(
            r#"[
                {"op": "tool", "tool": "shape"},
                {"op": "shape_kind", "kind": "RECT"},
                {"op": "color", "color": -65536},
                {"op": "text", "text": "hi", "x": 1, "y": 2},
                {"op": "undo"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            steps,
            vec![
                ScriptStep::Tool { tool: ToolKind::Shape },
                ScriptStep::ShapeKind { kind: ShapeKind::Rect },
                ScriptStep::Color {
                    color: ArgbColor::from_argb(255, 255, 0, 0)
                },
                ScriptStep::Text {
                    text: "hi".to_string(),
                    x: Some(1.0),
                    y: Some(2.0)
                },
                ScriptStep::Undo,
            ]
        );
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(matches!(parse(r#"[{"op": "zoom"}]"#), Err(AppError::Script(_))));
        assert!(matches!(
            parse(r#"[{"op": "down", "x": 1}]"#),
            Err(AppError::Script(_))
        ));
    }

    #[test]
    fn test_apply_gesture_and_text() {
        let mut board = Board::default();
        let steps = parse(
            r#"[
                {"op": "canvas", "width": 200, "height": 100},
                {"op": "down", "x": 0, "y": 0},
                {"op": "move", "x": 23, "y": 0},
                {"op": "up", "x": 23, "y": 0},
                {"op": "text", "text": "centered"},
                {"op": "text", "text": "  "},
                {"op": "text", "text": "side", "x": 10}
            ]"#,
        )
        .unwrap();
        for step in &steps {
            apply(&mut board, step).unwrap();
        }

        let doc = board.document();
        assert_eq!(doc.strokes.len(), 1);
        assert_eq!(doc.strokes[0].len(), 5);
        assert_eq!(doc.texts.len(), 2);
        assert_eq!(doc.texts[0].position(), Point::new(100.0, 74.0));
        assert_eq!(doc.texts[1].position(), Point::new(10.0, 74.0));
    }

    #[test]
    fn test_apply_bad_width() {
        let mut board = Board::default();
        let result = apply(&mut board, &ScriptStep::Width { width: -1.0 });
        assert!(matches!(result, Err(AppError::Board(_))));
    }
}
