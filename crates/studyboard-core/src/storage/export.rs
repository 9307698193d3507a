//! Export naming and save outcomes.

use super::{Location, Storage};
use crate::document::Document;
use crate::serialization;
use chrono::NaiveDateTime;
use std::fmt;

/// Kinds of files a board can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Rasterized image produced by a renderer.
    Png,
    /// The interchange document.
    Json,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Png => "png",
            ExportKind::Json => "json",
        }
    }
}

/// Turn user input into a file name for `kind`.
///
/// Surrounding whitespace is trimmed and the extension is appended unless the
/// name already ends with it (ignoring case). Returns `None` for blank input.
pub fn normalize_file_name(input: &str, kind: ExportKind) -> Option<String> {
    let name = input.trim();
    if name.is_empty() {
        return None;
    }

    let suffix = format!(".{}", kind.extension());
    let has_suffix = name.len() >= suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|end| end.eq_ignore_ascii_case(&suffix));

    if has_suffix {
        Some(name.to_string())
    } else {
        Some(format!("{}{}", name, suffix))
    }
}

/// Suggested name for an export made at `now`, e.g. `studyboard_20240131_093005.png`.
pub fn default_file_name(kind: ExportKind, now: NaiveDateTime) -> String {
    format!("studyboard_{}.{}", now.format("%Y%m%d_%H%M%S"), kind.extension())
}

/// Outcome of a save, reported once to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult {
    PngSaved(Location),
    JsonSaved(Location),
    Error(String),
}

impl SaveResult {
    pub fn is_ok(&self) -> bool {
        !matches!(self, SaveResult::Error(_))
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            SaveResult::PngSaved(location) | SaveResult::JsonSaved(location) => Some(location),
            SaveResult::Error(_) => None,
        }
    }
}

impl fmt::Display for SaveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveResult::PngSaved(location) => write!(f, "PNG saved to {}", location),
            SaveResult::JsonSaved(location) => write!(f, "JSON saved to {}", location),
            SaveResult::Error(message) => f.write_str(message),
        }
    }
}

/// Encode `document` and save it as `name` (normalized to a `.json` name).
pub async fn save_json(
    storage: &dyn Storage,
    name: &str,
    document: &Document,
    pretty: bool,
) -> SaveResult {
    let Some(name) = normalize_file_name(name, ExportKind::Json) else {
        return SaveResult::Error("File name must not be empty".to_string());
    };
    let json = serialization::encode(document, pretty);

    match storage.save(&name, json.as_bytes()).await {
        Ok(location) => {
            log::info!("Saved board to {}", location);
            SaveResult::JsonSaved(location)
        }
        Err(e) => {
            log::warn!("Failed to save {}: {}", name, e);
            SaveResult::Error(format!("JSON save error: {}", e))
        }
    }
}

/// Save PNG bytes rendered elsewhere as `name` (normalized to a `.png` name).
pub async fn save_png(storage: &dyn Storage, name: &str, png: &[u8]) -> SaveResult {
    let Some(name) = normalize_file_name(name, ExportKind::Png) else {
        return SaveResult::Error("File name must not be empty".to_string());
    };
    if png.is_empty() {
        return SaveResult::Error("Failed to save PNG".to_string());
    }

    match storage.save(&name, png).await {
        Ok(location) => {
            log::info!("Saved image to {}", location);
            SaveResult::PngSaved(location)
        }
        Err(e) => {
            log::warn!("Failed to save {}: {}", name, e);
            SaveResult::Error(format!("PNG save error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, block_on};
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_file_name() {
        assert_eq!(
            normalize_file_name("  notes ", ExportKind::Json).as_deref(),
            Some("notes.json")
        );
        assert_eq!(
            normalize_file_name("Lecture.PNG", ExportKind::Png).as_deref(),
            Some("Lecture.PNG")
        );
        assert_eq!(
            normalize_file_name("board.json", ExportKind::Png).as_deref(),
            Some("board.json.png")
        );
        assert_eq!(normalize_file_name("   ", ExportKind::Json), None);
        assert_eq!(normalize_file_name("", ExportKind::Png), None);
    }

    #[test]
    fn test_normalize_multibyte_name() {
        assert_eq!(
            normalize_file_name("ノート", ExportKind::Json).as_deref(),
            Some("ノート.json")
        );
    }

    #[test]
    fn test_default_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap();
        assert_eq!(
            default_file_name(ExportKind::Png, now),
            "studyboard_20240131_093005.png"
        );
        assert_eq!(
            default_file_name(ExportKind::Json, now),
            "studyboard_20240131_093005.json"
        );
    }

    #[test]
    fn test_save_json() {
        let storage = MemoryStorage::new();
        let document = Document::new(10, 20);

        let result = block_on(save_json(&storage, "board", &document, false));
        assert_eq!(
            result,
            SaveResult::JsonSaved(Location("memory://board.json".to_string()))
        );

        let bytes = block_on(storage.load("board.json")).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(serialization::decode(&text).unwrap(), document);
    }

    #[test]
    fn test_save_blank_name_is_error() {
        let storage = MemoryStorage::new();
        let result = block_on(save_json(&storage, " ", &Document::default(), true));
        assert!(!result.is_ok());
        assert!(storage.names().is_empty());
    }

    #[test]
    fn test_save_png() {
        let storage = MemoryStorage::new();

        let result = block_on(save_png(&storage, "sketch.png", &[0x89, b'P', b'N', b'G']));
        assert!(matches!(result, SaveResult::PngSaved(_)));
        assert_eq!(result.location().map(Location::as_str), Some("memory://sketch.png"));

        let result = block_on(save_png(&storage, "empty", &[]));
        assert!(matches!(result, SaveResult::Error(_)));
    }
}
