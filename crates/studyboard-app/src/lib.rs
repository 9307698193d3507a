//! StudyBoard Application
//!
//! Headless shell around the board engine: replays recorded scripts through a
//! [`Board`] and saves the result, or summarizes an exported document.

pub mod args;
pub mod script;

use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use studyboard_core::storage::{
    ExportKind, FileStorage, Location, SaveResult, StorageError, default_file_name, save_json,
};
use studyboard_core::{
    ArgbColor, Board, BoardConfig, BoardError, BoardEvent, ConfigError, Document,
};
use studyboard_render::{DisplayListRenderer, DrawCommand, RenderContext};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Save(String),
}

/// Options of the `replay` command.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub script: PathBuf,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub name: Option<String>,
    pub pretty: bool,
}

/// What a replay produced.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub steps: usize,
    /// Document changes observed while replaying.
    pub changes: usize,
    pub location: Location,
    pub document: Document,
    /// Summary of `document` painted on the configured background.
    pub inspection: Inspection,
}

/// Replay a script and save the final document as JSON.
pub fn replay(options: &ReplayOptions) -> Result<ReplayReport, AppError> {
    let config = match &options.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    let background = config.background_color;
    let mut board = Board::new(config)?;
    let events = board.subscribe();

    let steps = script::parse(&read_to_string(&options.script)?)?;
    for (index, step) in steps.iter().enumerate() {
        log::debug!("Step {}: {:?}", index, step);
        script::apply(&mut board, step)?;
    }

    let changes = events
        .try_iter()
        .filter(|event| matches!(event, BoardEvent::Changed { .. }))
        .count();

    let storage = match &options.out {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    let name = options
        .name
        .clone()
        .unwrap_or_else(|| default_file_name(ExportKind::Json, Local::now().naive_local()));

    match pollster::block_on(save_json(&storage, &name, board.document(), options.pretty)) {
        SaveResult::JsonSaved(location) | SaveResult::PngSaved(location) => Ok(ReplayReport {
            steps: steps.len(),
            changes,
            location,
            inspection: Inspection::of(board.document(), background),
            document: board.snapshot(),
        }),
        SaveResult::Error(message) => Err(AppError::Save(message)),
    }
}

/// Summary of an exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub width: u32,
    pub height: u32,
    pub strokes: usize,
    pub points: usize,
    pub shapes: usize,
    pub texts: usize,
    /// Draw commands needed to paint the whole canvas.
    pub draw_commands: usize,
    /// Color the canvas is cleared with.
    pub background: ArgbColor,
}

impl Inspection {
    pub fn of(document: &Document, background: ArgbColor) -> Self {
        let mut renderer = DisplayListRenderer::new();
        let ctx = RenderContext::new(document).with_background(background.into());
        let commands = renderer.render(&ctx).unwrap_or_default();
        let background = commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::Clear { color } => Some(*color),
                _ => None,
            })
            .unwrap_or(background);

        Self {
            width: document.width(),
            height: document.height(),
            strokes: document.strokes.len(),
            points: document.strokes.iter().map(|s| s.len()).sum(),
            shapes: document.shapes.len(),
            texts: document.texts.len(),
            draw_commands: commands.len(),
            background,
        }
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "canvas:   {}x{}", self.width, self.height)?;
        writeln!(f, "strokes:  {} ({} points)", self.strokes, self.points)?;
        writeln!(f, "shapes:   {}", self.shapes)?;
        writeln!(f, "texts:    {}", self.texts)?;
        write!(f, "commands: {}", self.draw_commands)
    }
}

/// Decode an exported document and summarize it.
pub fn inspect(path: &Path) -> Result<Inspection, AppError> {
    let document = studyboard_core::decode(&read_to_string(path)?)?;
    Ok(Inspection::of(
        &document,
        BoardConfig::default().background_color,
    ))
}

fn read_to_string(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}
