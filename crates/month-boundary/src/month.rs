//! Offset-preserving month boundaries.
//!
//! Every function here works in the instant's own recorded UTC offset: the
//! result carries the same offset as the input, and no zone rules are
//! consulted. For boundaries of a named zone's local calendar see
//! [`crate::tz_month`].

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

use crate::calendar::{add_months, first_of_month, minus_tick};
use crate::error::{BoundaryError, Result};
use crate::zone::local_wall_time;

/// A point in time with its own fixed UTC offset.
pub type Instant = DateTime<FixedOffset>;

/// The six month boundaries computed by both families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthBoundary {
    StartOfMonth,
    EndOfMonth,
    StartOfNextMonth,
    EndOfNextMonth,
    StartOfPreviousMonth,
    EndOfPreviousMonth,
}

impl MonthBoundary {
    pub const ALL: [MonthBoundary; 6] = [
        MonthBoundary::StartOfMonth,
        MonthBoundary::EndOfMonth,
        MonthBoundary::StartOfNextMonth,
        MonthBoundary::EndOfNextMonth,
        MonthBoundary::StartOfPreviousMonth,
        MonthBoundary::EndOfPreviousMonth,
    ];

    /// Which month start the boundary is derived from, counted from the
    /// current month, and whether one tick is taken off it.
    ///
    /// Every "end" is one tick before some month start.
    pub(crate) fn anchor(self) -> (i32, bool) {
        match self {
            MonthBoundary::StartOfMonth => (0, false),
            MonthBoundary::EndOfMonth => (1, true),
            MonthBoundary::StartOfNextMonth => (1, false),
            MonthBoundary::EndOfNextMonth => (2, true),
            MonthBoundary::StartOfPreviousMonth => (-1, false),
            MonthBoundary::EndOfPreviousMonth => (0, true),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonthBoundary::StartOfMonth => "start_of_month",
            MonthBoundary::EndOfMonth => "end_of_month",
            MonthBoundary::StartOfNextMonth => "start_of_next_month",
            MonthBoundary::EndOfNextMonth => "end_of_next_month",
            MonthBoundary::StartOfPreviousMonth => "start_of_previous_month",
            MonthBoundary::EndOfPreviousMonth => "end_of_previous_month",
        }
    }
}

/// Compute `boundary` for `instant` in the instant's own offset.
pub fn month_boundary(instant: Instant, boundary: MonthBoundary) -> Result<Instant> {
    let (months, less_one_tick) = boundary.anchor();
    let start = add_months(truncate_to_month(instant)?, months)?;
    if less_one_tick {
        minus_tick(start)
    } else {
        Ok(start)
    }
}

/// Midnight on day 1 of the instant's month, same offset.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use month_boundary::month::start_of_month;
///
/// let x = DateTime::parse_from_rfc3339("2024-02-17T09:45:12.5+05:30").unwrap();
/// let start = start_of_month(x).unwrap();
/// assert_eq!(start.to_rfc3339(), "2024-02-01T00:00:00+05:30");
/// ```
pub fn start_of_month(instant: Instant) -> Result<Instant> {
    month_boundary(instant, MonthBoundary::StartOfMonth)
}

/// The last tick of the instant's month, same offset.
pub fn end_of_month(instant: Instant) -> Result<Instant> {
    month_boundary(instant, MonthBoundary::EndOfMonth)
}

pub fn start_of_next_month(instant: Instant) -> Result<Instant> {
    month_boundary(instant, MonthBoundary::StartOfNextMonth)
}

pub fn end_of_next_month(instant: Instant) -> Result<Instant> {
    month_boundary(instant, MonthBoundary::EndOfNextMonth)
}

pub fn start_of_previous_month(instant: Instant) -> Result<Instant> {
    month_boundary(instant, MonthBoundary::StartOfPreviousMonth)
}

/// The tick immediately before the start of the instant's month.
pub fn end_of_previous_month(instant: Instant) -> Result<Instant> {
    month_boundary(instant, MonthBoundary::EndOfPreviousMonth)
}

fn truncate_to_month(instant: Instant) -> Result<Instant> {
    let first = first_of_month(&local_wall_time(&instant, instant.offset())?)?;
    instant
        .offset()
        .from_local_datetime(&first)
        .single()
        .ok_or_else(|| BoundaryError::OutOfRange(format!("start of month for {instant:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

    fn at(s: &str) -> Instant {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_start_of_month_truncates_everything() {
        let start = start_of_month(at("2023-08-19T17:22:09.123456789-07:00")).unwrap();
        assert_eq!((start.year(), start.month(), start.day()), (2023, 8, 1));
        assert_eq!(start.time(), NaiveTime::MIN);
        assert_eq!(start.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_start_of_month_idempotent() {
        let once = start_of_month(at("2023-08-19T17:22:09+02:00")).unwrap();
        assert_eq!(start_of_month(once).unwrap(), once);
    }

    #[test]
    fn test_end_of_month_leap_february() {
        let end = end_of_month(at("2024-02-10T12:00:00Z")).unwrap();
        assert_eq!((end.month(), end.day()), (2, 29));
        assert_eq!(
            (end.hour(), end.minute(), end.second(), end.nanosecond()),
            (23, 59, 59, 999_999_999)
        );
    }

    #[test]
    fn test_end_of_month_common_february() {
        let end = end_of_month(at("2023-02-10T12:00:00Z")).unwrap();
        assert_eq!((end.month(), end.day()), (2, 28));
    }

    #[test]
    fn test_end_of_month_thirty_day_month() {
        let end = end_of_month(at("2023-04-30T23:59:59+09:00")).unwrap();
        assert_eq!((end.month(), end.day()), (4, 30));
    }

    #[test]
    fn test_start_of_next_month_rolls_year() {
        let next = start_of_next_month(at("2023-12-31T23:00:00-03:00")).unwrap();
        assert_eq!((next.year(), next.month(), next.day()), (2024, 1, 1));
    }

    #[test]
    fn test_start_of_previous_month_rolls_year_back() {
        let prev = start_of_previous_month(at("2024-01-15T08:00:00Z")).unwrap();
        assert_eq!(prev.to_rfc3339(), "2023-12-01T00:00:00+00:00");
    }

    #[test]
    fn test_end_of_previous_month_is_tick_before_start() {
        let x = at("2024-03-31T10:00:00+01:00");
        let end_prev = end_of_previous_month(x).unwrap();
        assert_eq!((end_prev.month(), end_prev.day()), (2, 29));
        assert_eq!(
            end_prev + crate::calendar::tick(),
            start_of_month(x).unwrap()
        );
    }

    #[test]
    fn test_end_of_next_month_from_january() {
        let end = end_of_next_month(at("2023-01-31T10:00:00Z")).unwrap();
        assert_eq!((end.month(), end.day()), (2, 28));
        assert_eq!(end.nanosecond(), 999_999_999);
    }

    #[test]
    fn test_offset_preserved_across_family() {
        let x = at("2023-06-15T12:00:00+05:45");
        for boundary in MonthBoundary::ALL {
            let result = month_boundary(x, boundary).unwrap();
            assert_eq!(result.offset(), x.offset(), "{}", boundary.as_str());
        }
    }

    #[test]
    fn test_bounds_contain_instant() {
        let x = at("2023-06-01T00:00:00-12:00");
        assert!(start_of_month(x).unwrap() <= x);
        assert!(x <= end_of_month(x).unwrap());
    }

    #[test]
    fn test_month_is_local_to_offset_not_utc() {
        // 2023-07-01T02:00+05:00 is still June in UTC, but July in its own offset.
        let start = start_of_month(at("2023-07-01T02:00:00+05:00")).unwrap();
        assert_eq!(start.month(), 7);
    }

    #[test]
    fn test_wall_time_before_first_representable_date_is_out_of_range() {
        let earliest = NaiveDate::MIN.and_time(NaiveTime::MIN);
        let zone = FixedOffset::west_opt(3600).unwrap();
        let x = chrono::Utc.from_utc_datetime(&earliest).with_timezone(&zone);
        for boundary in MonthBoundary::ALL {
            let err = month_boundary(x, boundary).unwrap_err();
            assert!(matches!(err, BoundaryError::OutOfRange(_)), "got: {err}");
        }
    }

    #[test]
    fn test_near_max_is_out_of_range() {
        let last = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
        let x = FixedOffset::east_opt(0)
            .unwrap()
            .from_local_datetime(&last)
            .single()
            .unwrap();
        let err = start_of_next_month(x).unwrap_err();
        assert!(matches!(err, BoundaryError::OutOfRange(_)), "got: {err}");
    }
}
