// ABOUTME: Validated export time range with half-open membership semantics
// ABOUTME: TimeRange constructor enforces start <= end at the type boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use chrono::{DateTime, Duration, Utc};

use crate::errors::ExportError;

/// The date window an export covers.
///
/// Membership is half-open on the sample's *start* timestamp: a sample
/// belongs to the range when `start <= sample.start < end`. A sample that
/// merely overlaps the window without starting inside it is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidRange`] when `start` is after `end`.
    /// Empty ranges (`start == end`) are valid and match no samples.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ExportError> {
        if start > end {
            return Err(ExportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering the last `days` days, ending now
    #[must_use]
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Inclusive start of the window
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the window
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether a sample starting at `instant` belongs to this range
    #[must_use]
    pub fn contains_start(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{TimeZone, Utc};

    use super::TimeRange;
    use crate::errors::ExportError;

    #[test]
    fn inverted_bounds_are_rejected() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let err = TimeRange::new(start, end).unwrap_err();
        assert!(matches!(err, ExportError::InvalidRange { .. }));
    }

    #[test]
    fn membership_is_half_open_on_start() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let range = TimeRange::new(start, end).unwrap();

        assert!(range.contains_start(start));
        assert!(!range.contains_start(end));
        assert!(range.contains_start(start + chrono::Duration::hours(12)));
        assert!(!range.contains_start(start - chrono::Duration::seconds(1)));
    }

    #[test]
    fn empty_range_is_valid_and_matches_nothing() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let range = TimeRange::new(instant, instant).unwrap();
        assert!(!range.contains_start(instant));
    }
}
