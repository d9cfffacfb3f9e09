//! Pure state transitions for the tracked dataset.
//!
//! Every function takes the current state by value and returns the next one.
//! Nothing here reads the clock or touches storage; the caller supplies the
//! observation instant and persists the result.

use chrono::{DateTime, FixedOffset};

use crate::types::{Dataset, Profile, Record};

/// Creates a dataset seeded with one record for the calendar day of `at`.
#[must_use]
pub fn initialize(
    creator_id: &str,
    profile: Profile,
    follower_count: i64,
    at: DateTime<FixedOffset>,
) -> Dataset {
    Dataset {
        creator_id: creator_id.to_owned(),
        profile,
        records: vec![Record {
            date: at.date_naive(),
            followers: follower_count,
            change: 0,
            timestamp: Some(at),
        }],
        last_updated: Some(at),
    }
}

/// Merges a freshly fetched count into the series.
///
/// The calendar day is the local date of `at`. When the series already holds a
/// record for that day it is overwritten in place and its `change` is taken
/// against the record just before it, so repeated fetches on one day never
/// compound. Otherwise a new record is appended with `change` relative to the
/// last record.
#[must_use]
pub fn reconcile(
    mut series: Vec<Record>,
    follower_count: i64,
    at: DateTime<FixedOffset>,
) -> Vec<Record> {
    let today = at.date_naive();

    if let Some(index) = series.iter().position(|r| r.date == today) {
        let baseline = index
            .checked_sub(1)
            .map_or(follower_count, |prev| series[prev].followers);
        series[index] = Record {
            date: today,
            followers: follower_count,
            change: follower_count.saturating_sub(baseline),
            timestamp: Some(at),
        };
        return series;
    }

    let baseline = series.last().map_or(follower_count, |r| r.followers);
    series.push(Record {
        date: today,
        followers: follower_count,
        change: follower_count.saturating_sub(baseline),
        timestamp: Some(at),
    });
    series
}

/// Overwrites the profile snapshot.
#[must_use]
pub fn replace_profile(
    mut dataset: Dataset,
    profile: Profile,
    at: DateTime<FixedOffset>,
) -> Dataset {
    dataset.profile = profile;
    dataset.last_updated = Some(at);
    dataset
}

/// Applies one refresh: new profile snapshot plus the reconciled count.
#[must_use]
pub fn refresh(
    dataset: Dataset,
    profile: Profile,
    follower_count: i64,
    at: DateTime<FixedOffset>,
) -> Dataset {
    let mut dataset = replace_profile(dataset, profile, at);
    dataset.records = reconcile(std::mem::take(&mut dataset.records), follower_count, at);
    dataset
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
