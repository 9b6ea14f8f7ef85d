use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the flat-file document store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a document file failed.
    #[error("document i/o failed for {path}: {source}")]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// A document could not be serialized before being written out.
    #[error("failed to serialize document {name}: {source}")]
    Serialize {
        /// Logical document name.
        name: &'static str,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
