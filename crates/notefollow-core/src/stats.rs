//! Rolling follower deltas derived from the record series.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::types::Record;

pub const WEEK_DAYS: u64 = 7;
pub const MONTH_DAYS: u64 = 30;

/// Point-in-time deltas shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub current: i64,
    pub daily: i64,
    pub weekly: i64,
    pub monthly: i64,
    pub total: i64,
}

/// Derives the dashboard deltas as seen on `today`.
///
/// Weekly and monthly deltas compare against the nearest record on or before
/// 7 and 30 days ago; when no such record exists they fall back to the daily
/// and weekly figures respectively. An empty series yields all zeros.
/// Differences saturate at the `i64` bounds, since imported counts are not
/// range-checked.
#[must_use]
pub fn compute_stats(series: &[Record], today: NaiveDate) -> Stats {
    let (Some(first), Some(latest)) = (series.first(), series.last()) else {
        return Stats::default();
    };

    let current = latest.followers;
    let daily = if series.len() >= 2 { latest.change } else { 0 };

    let weekly = days_before(today, WEEK_DAYS)
        .and_then(|target| nearest_on_or_before(series, target))
        .map_or(daily, |r| current.saturating_sub(r.followers));

    let monthly = days_before(today, MONTH_DAYS)
        .and_then(|target| nearest_on_or_before(series, target))
        .map_or(weekly, |r| current.saturating_sub(r.followers));

    Stats {
        current,
        daily,
        weekly,
        monthly,
        total: current.saturating_sub(first.followers),
    }
}

/// Finds the record to compare against for `target`.
///
/// An exact date match wins; otherwise the series is scanned from the newest
/// record backward for the first one dated on or before `target`. If every
/// record is newer than `target` the oldest record is returned. Only an empty
/// series yields `None`.
#[must_use]
pub fn nearest_on_or_before(series: &[Record], target: NaiveDate) -> Option<&Record> {
    if let Some(exact) = series.iter().find(|r| r.date == target) {
        return Some(exact);
    }

    series
        .iter()
        .rev()
        .find(|r| r.date <= target)
        .or_else(|| series.first())
}

fn days_before(today: NaiveDate, days: u64) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(days))
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
