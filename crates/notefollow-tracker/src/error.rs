use notefollow_client::ClientError;
use notefollow_core::CoreError;
use notefollow_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("creator id must not be empty")]
    EmptyCreatorId,

    #[error("no creator is being tracked yet")]
    NotTracking,

    #[error("already tracking '{creator_id}'")]
    AlreadyTracking { creator_id: String },

    /// Another write holds the busy flag.
    #[error("another update is already in progress")]
    Busy,

    #[error("{action} overwrites the stored data and must be confirmed")]
    ConfirmationRequired { action: &'static str },

    #[error(transparent)]
    Fetch(#[from] ClientError),

    #[error("import rejected: {0}")]
    Import(#[source] CoreError),

    #[error("export failed: {0}")]
    Export(#[source] CoreError),

    #[error(transparent)]
    Persistence(#[from] StorageError),
}
