//! In-memory storage implementation.

use super::{BoxFuture, Location, Storage, StorageError, StorageResult, check_name};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all saved files, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<Location>> {
        let name = name.to_string();
        let bytes = bytes.to_vec();
        Box::pin(async move {
            check_name(&name)?;
            let location = Location(format!("memory://{}", name));
            self.files.write().insert(name, bytes);
            Ok(location)
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let name = name.to_string();
        Box::pin(async move {
            self.files
                .read()
                .get(&name)
                .cloned()
                .ok_or(StorageError::NotFound(name))
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move { Ok(self.files.read().contains_key(&name)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();

        let location = block_on(storage.save("board.json", b"{}")).unwrap();
        assert_eq!(location.as_str(), "memory://board.json");
        assert_eq!(block_on(storage.load("board.json")).unwrap(), b"{}");
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_overwrite() {
        let storage = MemoryStorage::new();

        assert!(!block_on(storage.exists("a.png")).unwrap());
        block_on(storage.save("a.png", &[1, 2])).unwrap();
        block_on(storage.save("a.png", &[3])).unwrap();
        assert!(block_on(storage.exists("a.png")).unwrap());
        assert_eq!(block_on(storage.load("a.png")).unwrap(), vec![3]);
        assert_eq!(storage.names(), vec!["a.png".to_string()]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            block_on(storage.save("  ", b"x")),
            Err(StorageError::Other(_))
        ));
    }
}
