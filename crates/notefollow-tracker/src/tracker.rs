use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use notefollow_core::{
    codec, store, Clock, Creator, DashboardView, Dataset, DatasetWarning, SystemClock,
    TrackingZone,
};
use notefollow_storage::{DatasetRepository, KeyValueStore};

use crate::error::TrackerError;
use crate::source::CreatorSource;

/// An export ready to be written out.
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct Import {
    pub dataset: Dataset,
    /// Problems that were accepted rather than rejected.
    pub warnings: Vec<DatasetWarning>,
}

/// Owns the stored dataset and the collaborators that feed it.
pub struct Tracker<S, F> {
    repository: DatasetRepository<S>,
    source: F,
    clock: Arc<dyn Clock>,
    zone: TrackingZone,
    /// Set while any operation that writes the dataset is running.
    busy: AtomicBool,
}

/// Holds the writer flag; releases it on drop.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn normalize_id(creator_id: &str) -> Result<&str, TrackerError> {
    let id = creator_id.trim();
    if id.is_empty() {
        return Err(TrackerError::EmptyCreatorId);
    }
    Ok(id)
}

fn require_confirmation(confirmed: bool, action: &'static str) -> Result<(), TrackerError> {
    if confirmed {
        Ok(())
    } else {
        Err(TrackerError::ConfirmationRequired { action })
    }
}

impl<S: KeyValueStore, F: CreatorSource> Tracker<S, F> {
    pub fn new(store: S, source: F, zone: TrackingZone) -> Self {
        Self {
            repository: DatasetRepository::new(store),
            source,
            clock: Arc::new(SystemClock),
            zone,
            busy: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current instant in the tracking zone.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.zone.localize(self.clock.now())
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Whether any write (tracking, refresh, change, import, reset) is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn acquire(&self, action: &'static str) -> Result<BusyGuard<'_>, TrackerError> {
        BusyGuard::acquire(&self.busy).ok_or_else(|| {
            tracing::warn!(action, "rejected while another write is in progress");
            TrackerError::Busy
        })
    }

    fn ensure_not_tracking(&self) -> Result<(), TrackerError> {
        match self.current()? {
            Some(existing) => Err(TrackerError::AlreadyTracking {
                creator_id: existing.creator_id,
            }),
            None => Ok(()),
        }
    }

    /// Seeds and saves a dataset; the caller holds the writer flag.
    fn seed(&self, creator: &Creator) -> Result<Dataset, TrackerError> {
        let dataset = store::initialize(
            &creator.urlname,
            creator.profile(),
            creator.follower_count,
            self.now(),
        );
        self.repository.save(&dataset)?;
        tracing::info!(
            creator_id = %dataset.creator_id,
            followers = creator.follower_count,
            "started tracking"
        );
        Ok(dataset)
    }

    /// Looks a creator up without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::EmptyCreatorId`] for a blank id, or
    /// [`TrackerError::Fetch`] if the profile endpoint fails.
    pub async fn check_profile(&self, creator_id: &str) -> Result<Creator, TrackerError> {
        let id = normalize_id(creator_id)?;
        Ok(self.source.fetch_creator(id).await?)
    }

    /// Starts tracking a creator previously returned by [`Self::check_profile`].
    ///
    /// The creator's `urlname` becomes the tracked id. An existing dataset is
    /// never overwritten; switching goes through [`Self::change_creator`].
    ///
    /// # Errors
    ///
    /// - [`TrackerError::Busy`]: another write is in flight.
    /// - [`TrackerError::AlreadyTracking`]: a dataset is already stored.
    /// - [`TrackerError::Persistence`]: the dataset cannot be saved.
    pub fn start_tracking_with(&self, creator: &Creator) -> Result<Dataset, TrackerError> {
        let _guard = self.acquire("start tracking")?;
        self.ensure_not_tracking()?;
        self.seed(creator)
    }

    /// Fetches a creator and starts tracking it.
    ///
    /// The writer flag is held across the fetch, so two concurrent calls
    /// cannot both seed a dataset.
    ///
    /// # Errors
    ///
    /// See [`Self::check_profile`] and [`Self::start_tracking_with`].
    pub async fn start_tracking(&self, creator_id: &str) -> Result<Dataset, TrackerError> {
        let id = normalize_id(creator_id)?;
        let _guard = self.acquire("start tracking")?;
        self.ensure_not_tracking()?;
        let creator = self.source.fetch_creator(id).await?;
        self.seed(&creator)
    }

    /// The stored dataset, if a creator is being tracked.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Persistence`] if storage cannot be read.
    pub fn current(&self) -> Result<Option<Dataset>, TrackerError> {
        Ok(self.repository.load()?)
    }

    fn load(&self) -> Result<Dataset, TrackerError> {
        self.current()?.ok_or(TrackerError::NotTracking)
    }

    /// Dashboard snapshot as of today.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotTracking`] when nothing is stored.
    pub fn dashboard(&self) -> Result<DashboardView, TrackerError> {
        let dataset = self.load()?;
        Ok(DashboardView::build(&dataset, self.today()))
    }

    /// Fetches the tracked creator and reconciles the new count.
    ///
    /// Holds the writer flag from load to save; a concurrent refresh, import,
    /// reset or creator change fails with [`TrackerError::Busy`] instead of
    /// racing it.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::Busy`]: another write is in flight.
    /// - [`TrackerError::NotTracking`]: nothing stored.
    /// - [`TrackerError::Fetch`]: the profile endpoint failed; storage unchanged.
    /// - [`TrackerError::Persistence`]: the updated dataset could not be saved.
    pub async fn refresh(&self) -> Result<Dataset, TrackerError> {
        let _guard = self.acquire("refresh")?;

        let dataset = self.load()?;
        let creator = self.source.fetch_creator(&dataset.creator_id).await?;
        let dataset = store::refresh(dataset, creator.profile(), creator.follower_count, self.now());
        self.repository.save(&dataset)?;

        if let Some(latest) = dataset.latest() {
            tracing::info!(
                creator_id = %dataset.creator_id,
                date = %latest.date,
                followers = latest.followers,
                change = latest.change,
                "refreshed follower count"
            );
        }
        Ok(dataset)
    }

    /// Switches to another creator, discarding the current series.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::ConfirmationRequired`] unless `confirmed`,
    /// [`TrackerError::Busy`] while another write is in flight, and otherwise
    /// the errors of [`Self::check_profile`] and saving.
    pub async fn change_creator(
        &self,
        creator_id: &str,
        confirmed: bool,
    ) -> Result<Dataset, TrackerError> {
        let id = normalize_id(creator_id)?;
        require_confirmation(confirmed, "changing the creator")?;
        let _guard = self.acquire("change creator")?;

        let creator = self.source.fetch_creator(id).await?;
        let dataset = store::initialize(id, creator.profile(), creator.follower_count, self.now());
        self.repository.save(&dataset)?;
        tracing::info!(creator_id = id, "switched tracked creator");
        Ok(dataset)
    }

    /// Serializes the stored dataset for download.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotTracking`] when nothing is stored.
    pub fn export(&self) -> Result<Export, TrackerError> {
        let dataset = self.load()?;
        let bytes = codec::serialize(&dataset).map_err(TrackerError::Export)?;
        Ok(Export {
            filename: codec::export_filename(&dataset.creator_id, self.today()),
            bytes,
        })
    }

    /// Replaces the stored dataset with an exported file.
    ///
    /// Values are not validated beyond the required fields; anything odd is
    /// returned as warnings and logged.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::ConfirmationRequired`] unless `confirmed`,
    /// [`TrackerError::Busy`] while another write is in flight,
    /// [`TrackerError::Import`] if the bytes are malformed, or
    /// [`TrackerError::Persistence`] if saving fails.
    pub fn import(&self, bytes: &[u8], confirmed: bool) -> Result<Import, TrackerError> {
        require_confirmation(confirmed, "importing")?;
        let _guard = self.acquire("import")?;

        let dataset = codec::deserialize(bytes).map_err(|e| {
            tracing::warn!(error = %e, "rejected import");
            TrackerError::Import(e)
        })?;
        let warnings = codec::inspect(&dataset);
        for warning in &warnings {
            tracing::warn!(creator_id = %dataset.creator_id, %warning, "imported questionable record");
        }

        self.repository.save(&dataset)?;
        tracing::info!(
            creator_id = %dataset.creator_id,
            records = dataset.records.len(),
            "imported dataset"
        );
        Ok(Import { dataset, warnings })
    }

    /// Deletes all stored data.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::ConfirmationRequired`] unless `confirmed`,
    /// [`TrackerError::Busy`] while another write is in flight, or
    /// [`TrackerError::Persistence`] if the store cannot remove it.
    pub fn reset(&self, confirmed: bool) -> Result<(), TrackerError> {
        require_confirmation(confirmed, "resetting")?;
        let _guard = self.acquire("reset")?;
        self.repository.clear()?;
        Ok(())
    }
}
