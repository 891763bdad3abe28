//! Calendar arithmetic shared by both boundary families.
//!
//! Month addition follows the usual calendar-add semantics: the day of month
//! is kept when it exists in the target month and clamped to that month's last
//! day otherwise. Time of day and offset are never touched. No day-count tables
//! are involved; "last day" always falls out of `first of next month - 1 tick`.

use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
};

use crate::error::{BoundaryError, Result};

/// Length of one tick in nanoseconds.
pub const TICK_NANOS: i64 = 1;

/// The minimal tick: one nanosecond, the finest increment `chrono` represents.
///
/// "Last instant of" boundaries are always expressed as `start of next - tick()`.
pub fn tick() -> TimeDelta {
    TimeDelta::nanoseconds(TICK_NANOS)
}

/// Add `months` calendar months (negative subtracts).
///
/// Intended for fixed-offset and UTC datetimes; for a DST zone the shifted
/// wall time may not exist, which surfaces as [`BoundaryError::OutOfRange`].
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, TimeZone, Utc};
/// use month_boundary::calendar::add_months;
///
/// let jan31 = Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap();
/// let feb = add_months(jan31, 1).unwrap();
/// assert_eq!((feb.month(), feb.day()), (2, 29));
/// ```
pub fn add_months<Tz: TimeZone>(dt: DateTime<Tz>, months: i32) -> Result<DateTime<Tz>> {
    let local = dt.naive_local();
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        dt.checked_add_months(step)
    } else {
        dt.checked_sub_months(step)
    };
    shifted.ok_or_else(|| BoundaryError::OutOfRange(format!("{local} {months:+} months")))
}

/// Shift a date by `months` calendar months, clamping the day like [`add_months`].
pub fn add_months_naive(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    shifted.ok_or_else(|| BoundaryError::OutOfRange(format!("{date} {months:+} months")))
}

/// One tick earlier.
pub fn minus_tick<Tz: TimeZone>(dt: DateTime<Tz>) -> Result<DateTime<Tz>> {
    let local = dt.naive_local();
    dt.checked_sub_signed(tick())
        .ok_or_else(|| BoundaryError::OutOfRange(format!("{local} - 1 tick")))
}

/// One tick later.
pub fn plus_tick<Tz: TimeZone>(dt: DateTime<Tz>) -> Result<DateTime<Tz>> {
    let local = dt.naive_local();
    dt.checked_add_signed(tick())
        .ok_or_else(|| BoundaryError::OutOfRange(format!("{local} + 1 tick")))
}

/// Midnight on day 1 of the month containing `local`, as a naive wall time.
pub fn first_of_month(local: &NaiveDateTime) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(local.year(), local.month(), 1)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| BoundaryError::OutOfRange(format!("first of month for {local}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn est() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    #[test]
    fn test_tick_is_one_nanosecond() {
        assert_eq!(tick().num_nanoseconds(), Some(1));
    }

    #[test]
    fn test_add_months_preserves_valid_day() {
        let dt = est().with_ymd_and_hms(2023, 3, 15, 10, 30, 0).unwrap();
        let shifted = add_months(dt, 1).unwrap();
        assert_eq!((shifted.month(), shifted.day()), (4, 15));
        assert_eq!(shifted.hour(), 10);
        assert_eq!(shifted.minute(), 30);
        assert_eq!(shifted.offset(), &est());
    }

    #[test]
    fn test_add_months_clamps_to_leap_february() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(add_months(dt, 1).unwrap().day(), 29);
    }

    #[test]
    fn test_add_months_clamps_to_common_february() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(add_months(dt, 1).unwrap().day(), 28);
    }

    #[test]
    fn test_add_months_negative_clamps() {
        let dt = Utc.with_ymd_and_hms(2023, 5, 31, 12, 0, 0).unwrap();
        let shifted = add_months(dt, -1).unwrap();
        assert_eq!((shifted.month(), shifted.day()), (4, 30));
    }

    #[test]
    fn test_add_months_crosses_year() {
        let dt = Utc.with_ymd_and_hms(2023, 12, 5, 0, 0, 0).unwrap();
        let shifted = add_months(dt, 2).unwrap();
        assert_eq!((shifted.year(), shifted.month()), (2024, 2));
    }

    #[test]
    fn test_add_months_out_of_range() {
        let max = Utc.from_utc_datetime(&NaiveDate::MAX.and_time(NaiveTime::MIN));
        let err = add_months(max, 1).unwrap_err();
        assert!(matches!(err, BoundaryError::OutOfRange(_)), "got: {err}");
    }

    #[test]
    fn test_add_months_naive_clamps() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            add_months_naive(date, -1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_minus_tick_crosses_midnight() {
        let dt = Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap();
        let prev = minus_tick(dt).unwrap();
        assert_eq!((prev.month(), prev.day()), (2, 28));
        assert_eq!(prev.nanosecond(), 999_999_999);
    }

    #[test]
    fn test_minus_tick_out_of_range() {
        let min = Utc.from_utc_datetime(&NaiveDate::MIN.and_time(NaiveTime::MIN));
        assert!(matches!(minus_tick(min), Err(BoundaryError::OutOfRange(_))));
    }

    #[test]
    fn test_plus_tick_undoes_minus_tick() {
        let dt = est().with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(plus_tick(minus_tick(dt).unwrap()).unwrap(), dt);
    }

    #[test]
    fn test_first_of_month() {
        let local = NaiveDate::from_ymd_opt(2023, 11, 17)
            .unwrap()
            .and_hms_nano_opt(13, 4, 5, 6)
            .unwrap();
        let first = first_of_month(&local).unwrap();
        assert_eq!(first.to_string(), "2023-11-01 00:00:00");
    }
}
