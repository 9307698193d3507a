//! Board configuration.

use crate::error::BoardError;
use crate::geometry::DEFAULT_SAMPLE_STEP;
use crate::shapes::ArgbColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] BoardError),
}

/// Tunables of the board engine.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BoardConfig {
    /// Arc-length distance between stored stroke points.
    pub sample_step: f64,
    /// Pointer displacement beyond which a shape gesture counts as a drag.
    pub touch_slop: f64,
    /// Side length of the square placed by a tap with the shape tool.
    pub default_shape_side: f64,
    /// Keep square shapes square while dragging.
    pub enforce_perfect_square: bool,
    /// Eraser width as a multiple of the pen width.
    pub eraser_width_multiplier: f64,
    /// Smallest eraser width.
    pub eraser_min_width: f64,
    /// Color painted by the eraser.
    pub background_color: ArgbColor,
    pub default_pen_color: ArgbColor,
    pub default_pen_width: f64,
    pub default_text_size: f64,
    /// Maximum number of undo states (`None` = unbounded).
    pub history_limit: Option<usize>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            sample_step: DEFAULT_SAMPLE_STEP,
            touch_slop: 8.0,
            default_shape_side: 200.0,
            enforce_perfect_square: true,
            eraser_width_multiplier: 3.0,
            eraser_min_width: 24.0,
            background_color: ArgbColor::WHITE,
            default_pen_color: ArgbColor::BLACK,
            default_pen_width: 8.0,
            default_text_size: 48.0,
            history_limit: None,
            canvas_width: 1080,
            canvas_height: 1920,
        }
    }
}

impl BoardConfig {
    /// Load config from a JSON file, or return defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: BoardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as pretty JSON, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that every length is a positive finite number.
    pub fn validate(&self) -> Result<(), BoardError> {
        let lengths = [
            ("sample_step", self.sample_step),
            ("default_shape_side", self.default_shape_side),
            ("eraser_width_multiplier", self.eraser_width_multiplier),
            ("eraser_min_width", self.eraser_min_width),
            ("default_pen_width", self.default_pen_width),
            ("default_text_size", self.default_text_size),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(BoardError::InvalidArgument(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(BoardError::InvalidArgument(format!(
                "touch_slop must not be negative, got {}",
                self.touch_slop
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.sample_step - 5.0).abs() < f64::EPSILON);
        assert!(config.enforce_perfect_square);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = BoardConfig::load(dir.path().join("board.json")).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, r#"{"touch_slop": 2.5, "enforce_perfect_square": false}"#).unwrap();

        let config = BoardConfig::load(&path).unwrap();
        assert!((config.touch_slop - 2.5).abs() < f64::EPSILON);
        assert!(!config.enforce_perfect_square);
        assert!((config.default_shape_side - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("board.json");

        let config = BoardConfig {
            history_limit: Some(10),
            default_pen_color: ArgbColor::from_argb(255, 200, 0, 0),
            ..BoardConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(BoardConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, r#"{"sample_step": 0}"#).unwrap();

        let result = BoardConfig::load(&path);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(BoardError::InvalidArgument(_)))
        ));
    }
}
