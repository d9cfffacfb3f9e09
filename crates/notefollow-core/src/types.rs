//! Dataset model persisted for the tracked creator.
//!
//! Field names serialize in camelCase so that files exported by earlier
//! versions of the dashboard (`creatorId`, `profileImageUrl`, `lastUpdated`)
//! import without conversion.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Display snapshot of the tracked creator. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub urlname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// One calendar-day observation of the follower count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar day in the tracking timezone.
    pub date: NaiveDate,
    #[serde(default)]
    pub followers: i64,
    /// Delta against the preceding day's record, not the previous fetch.
    #[serde(default)]
    pub change: i64,
    /// Absent in some hand-edited exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// Full persisted state for the single tracked creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub creator_id: String,
    pub profile: Profile,
    pub records: Vec<Record>,
    #[serde(default)]
    pub last_updated: Option<DateTime<FixedOffset>>,
}

impl Dataset {
    /// The most recent record, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Record> {
        self.records.last()
    }
}

/// A creator as returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: String,
    pub nickname: String,
    pub urlname: String,
    pub follower_count: i64,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl Creator {
    /// The profile fields kept in the dataset.
    #[must_use]
    pub fn profile(&self) -> Profile {
        Profile {
            nickname: self.nickname.clone(),
            urlname: self.urlname.clone(),
            profile_image_url: self.profile_image_url.clone(),
        }
    }
}
