//! Wire-format timestamps.
//!
//! The remote store serializes timestamps as milliseconds since the Unix
//! epoch. Keeping the wire type numeric means the store's order-by comparison
//! over raw JSON values is total and chronological, which the order-history
//! feed depends on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time as stored in remote documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Convert to a `chrono` datetime.
    ///
    /// Returns `None` for values outside the representable range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Format as a long date for display, e.g. `August 7, 2026`.
    ///
    /// Out-of-range values format as an empty string, matching how a missing
    /// timestamp renders.
    #[must_use]
    pub fn format_date(self) -> String {
        self.to_datetime()
            .map(|dt| dt.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_round_trip() {
        let ts = Timestamp::from_millis(1_723_000_000_000);
        assert_eq!(ts.as_millis(), 1_723_000_000_000);
    }

    #[test]
    fn test_serde_is_numeric() {
        let ts = Timestamp::from_millis(42);
        let json = serde_json::to_string(&ts).expect("serialize");
        assert_eq!(json, "42");

        let back: Timestamp = serde_json::from_str("42").expect("deserialize");
        assert_eq!(back, ts);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier = Timestamp::from_millis(1_000);
        let later = Timestamp::from_millis(2_000);
        assert!(earlier < later);
    }

    #[test]
    fn test_format_date() {
        // 2026-08-07T00:00:00Z
        let ts = Timestamp::from_millis(1_786_060_800_000);
        assert_eq!(ts.format_date(), "August 7, 2026");
    }
}
