//! Local persistence for the tracked dataset.
//!
//! [`KeyValueStore`] is the byte-level seam; [`DatasetRepository`] layers the
//! dataset codec on top and keeps the whole dataset under a single key, so
//! every save replaces it at once.

pub mod error;
pub mod kv;
pub mod repository;

pub use error::StorageError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{DatasetRepository, STORAGE_KEY};
