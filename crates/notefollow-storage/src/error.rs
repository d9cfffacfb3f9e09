use std::path::PathBuf;

use notefollow_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),

    /// The stored blob exists but no longer decodes as a dataset.
    #[error("stored dataset is unreadable: {0}")]
    Corrupt(#[source] CoreError),

    #[error("failed to encode dataset: {0}")]
    Encode(#[source] CoreError),

    #[error("in-memory store lock poisoned")]
    Poisoned,
}
