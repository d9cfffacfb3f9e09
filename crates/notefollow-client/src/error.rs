use thiserror::Error;

/// Errors returned by the creator profile client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint does not know the requested creator.
    #[error("creator not found: {creator_id}")]
    NotFound { creator_id: String },

    /// The endpoint answered with a non-2xx status other than 404.
    #[error("API error: HTTP {status} for creator {creator_id}")]
    ApiError { status: u16, creator_id: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("profile endpoint unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid proxy URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
