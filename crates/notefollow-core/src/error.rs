use thiserror::Error;

/// Errors produced by the dataset codec.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Imported or stored bytes do not have the shape of a dataset.
    #[error("malformed dataset: {reason}")]
    MalformedData { reason: String },

    #[error("failed to encode dataset: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
