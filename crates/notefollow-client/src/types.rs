//! Response shapes of the profile proxy.
//!
//! The proxy forwards note.com's creator endpoint and answers
//! `{"data": {...}}`. `data` is `null` or absent for unknown creators even
//! when the HTTP status is 200. The numeric `id` is kept as text.

use notefollow_core::Creator;
use serde::Deserialize;

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct CreatorResponse {
    #[serde(default)]
    pub data: Option<CreatorData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorData {
    pub id: serde_json::Value,
    pub nickname: String,
    pub urlname: String,
    pub follower_count: i64,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl From<CreatorData> for Creator {
    fn from(data: CreatorData) -> Self {
        let id = match data.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Creator {
            id,
            nickname: data.nickname,
            urlname: data.urlname,
            follower_count: data.follower_count,
            profile_image_url: data.profile_image_url.filter(|url| !url.is_empty()),
        }
    }
}
