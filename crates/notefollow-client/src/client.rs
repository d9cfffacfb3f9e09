//! HTTP client for the creator profile proxy.
//!
//! One request per call; failures are returned as typed errors and never
//! retried here.

use std::time::Duration;

use notefollow_core::Creator;
use reqwest::{Client, StatusCode, Url};

use crate::error::ClientError;
use crate::types::CreatorResponse;

/// Client for the `?id=<creator>` profile proxy.
///
/// Use [`NoteClient::new`] with the configured proxy URL, or point it at a
/// mock server in tests.
pub struct NoteClient {
    client: Client,
    proxy_url: Url,
}

impl NoteClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `proxy_url` does not parse, or
    /// [`ClientError::Unreachable`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(proxy_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let proxy_url = Url::parse(proxy_url).map_err(|e| ClientError::InvalidUrl {
            url: proxy_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, proxy_url })
    }

    /// Fetches the current profile and follower count of `creator_id`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`]: HTTP 404, or a 200 without `data`.
    /// - [`ClientError::ApiError`]: any other non-2xx status.
    /// - [`ClientError::Unreachable`]: network or TLS failure.
    /// - [`ClientError::Deserialize`]: response body is not the expected JSON.
    pub async fn fetch_creator(&self, creator_id: &str) -> Result<Creator, ClientError> {
        let url = self.creator_url(creator_id);
        tracing::debug!(creator_id, url = %url, "fetching creator profile");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                creator_id: creator_id.to_owned(),
            });
        }

        if !status.is_success() {
            tracing::warn!(creator_id, status = status.as_u16(), "profile endpoint error");
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                creator_id: creator_id.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<CreatorResponse>(&body).map_err(|e| {
            ClientError::Deserialize {
                context: format!("creator {creator_id}"),
                source: e,
            }
        })?;

        let creator: Creator = parsed
            .data
            .ok_or_else(|| ClientError::NotFound {
                creator_id: creator_id.to_owned(),
            })?
            .into();

        tracing::info!(
            creator_id,
            urlname = %creator.urlname,
            followers = creator.follower_count,
            "fetched creator profile"
        );
        Ok(creator)
    }

    /// Builds `<proxy>?id=<creator_id>`; the id is percent-encoded.
    fn creator_url(&self, creator_id: &str) -> Url {
        let mut url = self.proxy_url.clone();
        url.query_pairs_mut().clear().append_pair("id", creator_id);
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
