//! Wall-clock access for the boundary layers.
//!
//! The record store and statistics engine never read the system time; callers
//! resolve "now" through a [`Clock`] and a [`TrackingZone`] and pass it in.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Offset of Asia/Tokyo, which has no daylight saving.
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The fixed timezone that calendar days are counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingZone(FixedOffset);

impl TrackingZone {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self(offset)
    }

    /// Builds a zone from a whole-hour UTC offset; `None` outside -23..=23.
    #[must_use]
    pub fn from_hours(hours: i32) -> Option<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Self)
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.0
    }

    /// Converts a UTC instant into this zone.
    #[must_use]
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.0)
    }

    /// Calendar day of `instant` in this zone.
    #[must_use]
    pub fn today(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.localize(instant).date_naive()
    }
}

impl Default for TrackingZone {
    fn default() -> Self {
        Self(FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or(Utc.fix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_zone_is_jst() {
        assert_eq!(TrackingZone::default().offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn from_hours_rejects_out_of_range_offsets() {
        assert!(TrackingZone::from_hours(24).is_none());
        assert!(TrackingZone::from_hours(-24).is_none());
        assert!(TrackingZone::from_hours(-5).is_some());
    }

    #[test]
    fn today_rolls_over_at_local_midnight() {
        let zone = TrackingZone::default();
        // 15:30 UTC is 00:30 the next day in Tokyo.
        let instant = chrono::Utc.with_ymd_and_hms(2026, 1, 27, 15, 30, 0).unwrap();
        assert_eq!(
            zone.today(instant),
            NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()
        );
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
