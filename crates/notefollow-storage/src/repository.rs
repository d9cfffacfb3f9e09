use notefollow_core::{codec, Dataset};

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Key the dataset blob lives under.
pub const STORAGE_KEY: &str = "note-follower-data";

/// Loads and saves the single tracked dataset.
#[derive(Debug)]
pub struct DatasetRepository<S> {
    store: S,
}

impl<S: KeyValueStore> DatasetRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `None` when nothing is being tracked yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if the stored blob no longer decodes,
    /// or the store's own error if it cannot be read.
    pub fn load(&self) -> Result<Option<Dataset>, StorageError> {
        let Some(bytes) = self.store.get(STORAGE_KEY)? else {
            return Ok(None);
        };
        let dataset = codec::deserialize(&bytes).map_err(|e| {
            tracing::error!(error = %e, "stored dataset failed to decode");
            StorageError::Corrupt(e)
        })?;
        Ok(Some(dataset))
    }

    /// Replaces the stored dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or writing fails; the previous
    /// dataset is then left in place.
    pub fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let bytes = codec::serialize(dataset).map_err(StorageError::Encode)?;
        self.store.set(STORAGE_KEY, &bytes)?;
        tracing::debug!(
            creator_id = %dataset.creator_id,
            records = dataset.records.len(),
            "saved dataset"
        );
        Ok(())
    }

    /// Irreversibly discards the stored dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot remove it.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(STORAGE_KEY)?;
        tracing::info!("cleared stored dataset");
        Ok(())
    }
}
