//! Storage abstraction for exported boards.

mod export;
mod file;
mod memory;

pub use export::{ExportKind, SaveResult, default_file_name, normalize_file_name, save_json, save_png};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where a backend put a saved file, e.g. a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(pub String);

impl Location {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend that stores named files.
///
/// Names include their extension. Saving under an existing name replaces it.
pub trait Storage: Send + Sync {
    /// Save `bytes` under `name`.
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<Location>>;

    /// Load the bytes saved under `name`.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>>;

    /// Check if something is saved under `name`.
    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

fn check_name(name: &str) -> StorageResult<()> {
    if name.trim().is_empty() {
        return Err(StorageError::Other("File name must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
