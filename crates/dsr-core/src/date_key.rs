//! # Date Keys
//!
//! Calendar-date keys used to bucket sales by day, and the one time
//! reference that decides which day a timestamp belongs to.
//!
//! ## One Reference, Everywhere
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A chai sold at 2024-01-01T20:00:00Z                                    │
//! │                                                                         │
//! │    reference UTC        ──► DateKey 2024-01-01                          │
//! │    reference UTC+05:30  ──► DateKey 2024-01-02                          │
//! │                                                                         │
//! │  The "today" filter and the day-wise grouping MUST share the same      │
//! │  TimeReference, or a sale can show up under a different day in each.   │
//! │  The reference is configured once at startup and passed down.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// DateKey
// =============================================================================

/// A calendar date rendered as `YYYY-MM-DD`.
///
/// Ordering is chronological, which for this format is also the
/// lexicographic order of the rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    #[inline]
    pub const fn from_date(date: NaiveDate) -> Self {
        DateKey(date)
    }

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    /// Parses a strict `YYYY-MM-DD` key.
    ///
    /// ```rust
    /// use dsr_core::DateKey;
    ///
    /// let key: DateKey = "2024-01-01".parse().unwrap();
    /// assert_eq!(key.to_string(), "2024-01-01");
    /// assert!("01/01/2024".parse::<DateKey>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(DateKey)
            .map_err(|_| ValidationError::invalid_format("date", "expected YYYY-MM-DD"))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TimeReference
// =============================================================================

/// The fixed UTC offset in which timestamps are truncated to dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    offset: FixedOffset,
}

impl TimeReference {
    /// Truncate in UTC.
    pub fn utc() -> Self {
        TimeReference {
            offset: Utc.fix(),
        }
    }

    /// Truncate at a fixed offset east of UTC, in minutes (IST is 330).
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| TimeReference { offset })
            .ok_or(ValidationError::OutOfRange {
                field: "utc offset minutes".to_string(),
                min: -1439,
                max: 1439,
            })
    }

    /// Offset east of UTC in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Derives the DateKey for a timestamp.
    pub fn date_key(&self, at: &DateTime<Utc>) -> DateKey {
        DateKey(at.with_timezone(&self.offset).date_naive())
    }
}

impl Default for TimeReference {
    fn default() -> Self {
        TimeReference::utc()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_truncation() {
        let reference = TimeReference::utc();
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(reference.date_key(&late).to_string(), "2024-01-01");
    }

    #[test]
    fn test_offset_moves_evening_sale_to_next_day() {
        let ist = TimeReference::from_offset_minutes(330).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        assert_eq!(ist.date_key(&evening).to_string(), "2024-01-02");
        assert_eq!(ist.offset_minutes(), 330);
    }

    #[test]
    fn test_negative_offset() {
        let reference = TimeReference::from_offset_minutes(-300).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        assert_eq!(reference.date_key(&early).to_string(), "2024-02-29");
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(TimeReference::from_offset_minutes(24 * 60).is_err());
        assert!(TimeReference::from_offset_minutes(i32::MAX).is_err());
    }

    #[test]
    fn test_string_order_matches_date_order() {
        let a: DateKey = "2023-12-31".parse().unwrap();
        let b: DateKey = "2024-01-01".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_serde_as_string() {
        let key: DateKey = "2024-01-02".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-01-02\"");
        let back: DateKey = serde_json::from_str("\"2024-01-02\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"2024-13-01\"").is_err());
    }
}
