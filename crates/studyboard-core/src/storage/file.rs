//! File-based storage implementation.

use super::{BoxFuture, Location, Storage, StorageError, StorageResult, check_name};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform data directory.
pub const DEFAULT_DIR_NAME: &str = "StudyBoard";

/// File-based storage.
///
/// Stores every file flat in a single directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for saved files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/StudyBoard/`
    /// On Windows: `%APPDATA%\StudyBoard\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join(DEFAULT_DIR_NAME))
    }

    /// Get the file path for a name.
    fn file_path(&self, name: &str) -> PathBuf {
        // Keep names flat inside the base directory
        let mut safe: String = name
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if safe.starts_with('.') {
            safe.insert(0, '_');
        }
        self.base_path.join(safe)
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<Location>> {
        let checked = check_name(name);
        let path = self.file_path(name);
        let bytes = bytes.to_vec();

        Box::pin(async move {
            checked?;
            fs::write(&path, bytes).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            log::debug!("Wrote {}", path.display());
            Ok(Location(path.display().to_string()))
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let path = self.file_path(name);
        let name = name.to_string();

        Box::pin(async move {
            if !path.is_file() {
                return Err(StorageError::NotFound(name));
            }
            fs::read(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.file_path(name);
        Box::pin(async move { Ok(path.is_file()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let location = block_on(storage.save("board.json", b"{\"strokes\":[]}")).unwrap();
        assert_eq!(
            location.as_str(),
            dir.path().join("board.json").display().to_string()
        );

        let loaded = block_on(storage.load("board.json")).unwrap();
        assert_eq!(loaded, b"{\"strokes\":[]}");
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("nested").join("StudyBoard");
        let storage = FileStorage::new(base.clone()).unwrap();

        assert!(base.is_dir());
        assert_eq!(storage.base_path(), base.as_path());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent.json"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!block_on(storage.exists("nonexistent.json")).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_name() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("../notes/a:b*.png", &[0x89, 0x50])).unwrap();

        // Should still be loadable with the same name, and stay inside the base directory
        assert_eq!(block_on(storage.load("../notes/a:b*.png")).unwrap(), vec![0x89, 0x50]);
        assert!(dir.path().join("_.._notes_a_b_.png").is_file());
    }

    #[test]
    fn test_file_storage_rejects_empty_name() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(block_on(storage.save("", b"x")).is_err());
    }
}
