//! Text annotation.

use super::ArgbColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A text annotation anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextItem {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: ArgbColor,
    pub text_size: f64,
}

impl TextItem {
    pub fn new(position: Point, text: impl Into<String>, color: ArgbColor, text_size: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            text: text.into(),
            color,
            text_size,
        }
    }

    /// Anchor point of the text.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check whether the content is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
