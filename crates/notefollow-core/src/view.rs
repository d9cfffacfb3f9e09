//! Read-only snapshots handed to presentation layers.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::stats::{compute_stats, Stats};
use crate::types::{Dataset, Profile, Record};

/// Number of records listed in the recent-history table.
pub const RECENT_LIMIT: usize = 10;

const PROFILE_BASE_URL: &str = "https://note.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Short `M/D` axis label.
    pub label: String,
    /// Full date for tooltips; empty for the placeholder point.
    pub date: String,
    pub value: i64,
}

/// Everything the dashboard shows, computed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub creator_id: String,
    pub profile: Profile,
    pub profile_url: String,
    pub stats: Stats,
    /// Newest first.
    pub recent: Vec<Record>,
    pub followers_chart: Vec<ChartPoint>,
    pub change_chart: Vec<ChartPoint>,
    pub last_updated: Option<DateTime<FixedOffset>>,
}

impl DashboardView {
    #[must_use]
    pub fn build(dataset: &Dataset, today: NaiveDate) -> Self {
        Self {
            creator_id: dataset.creator_id.clone(),
            profile: dataset.profile.clone(),
            profile_url: profile_url(&dataset.profile.urlname),
            stats: compute_stats(&dataset.records, today),
            recent: recent_records(&dataset.records, RECENT_LIMIT),
            followers_chart: followers_chart(&dataset.records),
            change_chart: change_chart(&dataset.records),
            last_updated: dataset.last_updated,
        }
    }
}

#[must_use]
pub fn profile_url(urlname: &str) -> String {
    format!("{PROFILE_BASE_URL}{urlname}")
}

/// The last `limit` records, newest first.
#[must_use]
pub fn recent_records(series: &[Record], limit: usize) -> Vec<Record> {
    series.iter().rev().take(limit).cloned().collect()
}

#[must_use]
pub fn followers_chart(series: &[Record]) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|r| point(&r.date.to_string(), r.followers))
        .collect()
}

/// Daily change bars. The first record's change is meaningless and skipped;
/// when nothing remains a single zero bar keeps the chart from being empty.
#[must_use]
pub fn change_chart(series: &[Record]) -> Vec<ChartPoint> {
    let points: Vec<ChartPoint> = series
        .iter()
        .skip(1)
        .map(|r| point(&r.date.to_string(), r.change))
        .collect();

    if points.is_empty() {
        let date = series.first().map(|r| r.date.to_string()).unwrap_or_default();
        return vec![point(&date, 0)];
    }
    points
}

fn point(date: &str, value: i64) -> ChartPoint {
    ChartPoint {
        label: date_label(date),
        date: date.to_owned(),
        value,
    }
}

/// Formats `YYYY-MM-DD` as `M/D`; anything else passes through unchanged.
#[must_use]
pub fn date_label(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    let [_, month, day] = parts.as_slice() else {
        return date.to_owned();
    };
    match (month.parse::<u32>(), day.parse::<u32>()) {
        (Ok(m), Ok(d)) => format!("{m}/{d}"),
        _ => date.to_owned(),
    }
}

/// Direction of a delta, used to colour values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Flat,
}

impl Trend {
    #[must_use]
    pub fn of(value: i64) -> Self {
        match value.signum() {
            1 => Trend::Positive,
            -1 => Trend::Negative,
            _ => Trend::Flat,
        }
    }
}

/// Groups digits in threes: `12345` becomes `12,345`.
#[must_use]
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Like [`format_count`] with an explicit `+` on gains.
#[must_use]
pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", format_count(value))
    } else {
        format_count(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::store;

    fn jst_at(day: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, day, 10, 0, 0)
            .unwrap()
    }

    fn dataset_with_days(days: u32) -> Dataset {
        let profile = Profile {
            nickname: "Hasyamo".to_string(),
            urlname: "hasyamo".to_string(),
            profile_image_url: None,
        };
        let mut dataset = store::initialize("hasyamo", profile.clone(), 100, jst_at(1));
        for day in 2..=days {
            dataset = store::refresh(dataset, profile.clone(), 100 + i64::from(day), jst_at(day));
        }
        dataset
    }

    #[test]
    fn date_label_drops_zero_padding() {
        assert_eq!(date_label("2026-01-05"), "1/5");
        assert_eq!(date_label("2026-12-31"), "12/31");
    }

    #[test]
    fn date_label_passes_through_unexpected_shapes() {
        assert_eq!(date_label("yesterday"), "yesterday");
        assert_eq!(date_label("2026-xx-01"), "2026-xx-01");
        assert_eq!(date_label(""), "");
    }

    #[test]
    fn recent_lists_last_ten_newest_first() {
        let dataset = dataset_with_days(15);
        let recent = recent_records(&dataset.records, RECENT_LIMIT);

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].date.to_string(), "2026-01-15");
        assert_eq!(recent[9].date.to_string(), "2026-01-06");
    }

    #[test]
    fn change_chart_skips_seed_record() {
        let dataset = dataset_with_days(3);
        let chart = change_chart(&dataset.records);

        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].label, "1/2");
        // seed 100 -> 102 on day 2
        assert_eq!(chart[0].value, 2);
    }

    #[test]
    fn change_chart_has_placeholder_for_single_record() {
        let dataset = dataset_with_days(1);
        let chart = change_chart(&dataset.records);

        assert_eq!(
            chart,
            vec![ChartPoint {
                label: "1/1".to_string(),
                date: "2026-01-01".to_string(),
                value: 0
            }]
        );
    }

    #[test]
    fn change_chart_placeholder_for_empty_series_has_empty_label() {
        let chart = change_chart(&[]);
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].label, "");
        assert_eq!(chart[0].value, 0);
    }

    #[test]
    fn followers_chart_has_one_point_per_record() {
        let dataset = dataset_with_days(4);
        let values: Vec<i64> = followers_chart(&dataset.records)
            .into_iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![100, 102, 103, 104]);
    }

    #[test]
    fn dashboard_links_to_profile_page() {
        let dataset = dataset_with_days(2);
        let view = DashboardView::build(&dataset, dataset.latest().unwrap().date);

        assert_eq!(view.profile_url, "https://note.com/hasyamo");
        assert_eq!(view.stats.current, 102);
        assert_eq!(view.stats.daily, 2);
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-12_345), "-12,345");
    }

    #[test]
    fn format_signed_marks_gains_only() {
        assert_eq!(format_signed(1_500), "+1,500");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(-3), "-3");
    }

    #[test]
    fn trend_follows_sign() {
        assert_eq!(Trend::of(4), Trend::Positive);
        assert_eq!(Trend::of(-4), Trend::Negative);
        assert_eq!(Trend::of(0), Trend::Flat);
    }
}
