//! Temporal types for stay scheduling
//!
//! This module provides the date-range type used for reservations and the
//! timezone helpers for resolving office-local day boundaries.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Timezone wrapper for hostel office locations
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(self.0)
            .single()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Manila)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid stay: check-out {check_out} precedes check-in {check_in}")]
    InvalidStay {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// A reservation's stay as a half-open date range `[check_in, check_out)`
///
/// The check-out day is not occupied: a Jan 1 to Jan 5 stay is four nights,
/// and a bed freed on Jan 5 can be taken by a stay starting Jan 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Creates a new stay period
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::InvalidStay` if check-out precedes check-in.
    /// Inverted ranges are rejected at creation rather than silently clamped
    /// downstream in billing.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, TemporalError> {
        if check_out < check_in {
            return Err(TemporalError::InvalidStay { check_in, check_out });
        }
        Ok(Self { check_in, check_out })
    }

    /// Returns the check-in date
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the signed length of stay in nights
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns the billable length of stay, floored at zero
    pub fn billable_nights(&self) -> i64 {
        self.nights().max(0)
    }

    /// Returns true if the given date falls within the occupied range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }

    /// Returns true if this stay overlaps another
    ///
    /// Half-open intersection: back-to-back stays sharing a check-in/check-out
    /// day do not overlap.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stay_creation_and_nights() {
        let stay = StayPeriod::new(date(2025, 1, 1), date(2025, 1, 5)).unwrap();
        assert_eq!(stay.nights(), 4);
        assert_eq!(stay.billable_nights(), 4);
    }

    #[test]
    fn test_inverted_stay_rejected() {
        let result = StayPeriod::new(date(2025, 1, 5), date(2025, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidStay { .. })));
    }

    #[test]
    fn test_same_day_stay_has_zero_nights() {
        let stay = StayPeriod::new(date(2025, 1, 1), date(2025, 1, 1)).unwrap();
        assert_eq!(stay.billable_nights(), 0);
    }

    #[test]
    fn test_contains_excludes_checkout_day() {
        let stay = StayPeriod::new(date(2025, 1, 1), date(2025, 1, 5)).unwrap();
        assert!(stay.contains(date(2025, 1, 1)));
        assert!(stay.contains(date(2025, 1, 4)));
        assert!(!stay.contains(date(2025, 1, 5)));
    }

    #[test]
    fn test_overlap() {
        let a = StayPeriod::new(date(2025, 1, 1), date(2025, 1, 5)).unwrap();
        let b = StayPeriod::new(date(2025, 1, 4), date(2025, 1, 8)).unwrap();
        let c = StayPeriod::new(date(2025, 1, 5), date(2025, 1, 9)).unwrap();

        assert!(a.overlaps(&b));
        // back-to-back stays share a turnover day
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_timezone_day_boundary() {
        let tz = Timezone::default();
        let start = tz.start_of_day(date(2025, 1, 1));
        // Manila is UTC+8, midnight local is 16:00 the previous day in UTC
        assert_eq!(start.to_rfc3339(), "2024-12-31T16:00:00+00:00");
    }
}
