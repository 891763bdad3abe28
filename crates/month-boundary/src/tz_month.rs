//! Month boundaries in a named zone's local calendar.
//!
//! The instant is read as a wall-clock time in the zone, truncated to local
//! midnight on day 1 of its month, moved by whole calendar months on the
//! naive local date, and only then converted back through the zone's rules.
//! Each boundary is therefore resolved with the UTC offset in force at that
//! particular local midnight, which may differ from the input's offset and
//! from the offset at the other end of the month.
//!
//! Results are always absolute ([`Utc`]), whatever offset the input carried.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};

use crate::calendar::{add_months_naive, first_of_month, minus_tick};
use crate::error::Result;
use crate::month::{Instant, MonthBoundary};
use crate::zone::{local_to_utc, local_wall_time, ResolvedInstant, TzOptions};

/// Compute `boundary` in `zone`'s calendar, reporting how the local midnight
/// behind it was resolved.
///
/// For "end" boundaries the resolution describes the following month start,
/// from which the last tick is derived.
pub fn resolve_tz_month_boundary<Z: TimeZone>(
    instant: Instant,
    zone: &Z,
    boundary: MonthBoundary,
    options: &TzOptions,
) -> Result<ResolvedInstant> {
    let (months, less_one_tick) = boundary.anchor();
    let local = local_wall_time(&instant, zone)?;
    let month_start = first_of_month(&local)?;
    let target = add_months_naive(month_start.date(), months)?.and_time(NaiveTime::MIN);
    let resolved = local_to_utc(zone, &target, options)?;
    if less_one_tick {
        Ok(ResolvedInstant {
            instant: minus_tick(resolved.instant)?,
            ..resolved
        })
    } else {
        Ok(resolved)
    }
}

pub fn tz_month_boundary_with_options<Z: TimeZone>(
    instant: Instant,
    zone: &Z,
    boundary: MonthBoundary,
    options: &TzOptions,
) -> Result<DateTime<Utc>> {
    resolve_tz_month_boundary(instant, zone, boundary, options).map(|r| r.instant)
}

/// Compute `boundary` in `zone`'s calendar with the default DST policies.
pub fn tz_month_boundary<Z: TimeZone>(
    instant: Instant,
    zone: &Z,
    boundary: MonthBoundary,
) -> Result<DateTime<Utc>> {
    tz_month_boundary_with_options(instant, zone, boundary, &TzOptions::default())
}

/// Local midnight on day 1 of the instant's month in `zone`, as UTC.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use month_boundary::tz_month::start_of_tz_month;
///
/// let x = DateTime::parse_from_rfc3339("2023-11-01T12:00:00Z").unwrap();
/// let start = start_of_tz_month(x, &chrono_tz::America::New_York).unwrap();
/// // Midnight EDT, before the November 5 fall-back.
/// assert_eq!(start.to_rfc3339(), "2023-11-01T04:00:00+00:00");
/// ```
pub fn start_of_tz_month<Z: TimeZone>(instant: Instant, zone: &Z) -> Result<DateTime<Utc>> {
    tz_month_boundary(instant, zone, MonthBoundary::StartOfMonth)
}

/// The last tick before the next local month starts in `zone`, as UTC.
pub fn end_of_tz_month<Z: TimeZone>(instant: Instant, zone: &Z) -> Result<DateTime<Utc>> {
    tz_month_boundary(instant, zone, MonthBoundary::EndOfMonth)
}

pub fn start_of_previous_tz_month<Z: TimeZone>(
    instant: Instant,
    zone: &Z,
) -> Result<DateTime<Utc>> {
    tz_month_boundary(instant, zone, MonthBoundary::StartOfPreviousMonth)
}

pub fn end_of_previous_tz_month<Z: TimeZone>(
    instant: Instant,
    zone: &Z,
) -> Result<DateTime<Utc>> {
    tz_month_boundary(instant, zone, MonthBoundary::EndOfPreviousMonth)
}

pub fn start_of_next_tz_month<Z: TimeZone>(instant: Instant, zone: &Z) -> Result<DateTime<Utc>> {
    tz_month_boundary(instant, zone, MonthBoundary::StartOfNextMonth)
}

pub fn end_of_next_tz_month<Z: TimeZone>(instant: Instant, zone: &Z) -> Result<DateTime<Utc>> {
    tz_month_boundary(instant, zone, MonthBoundary::EndOfNextMonth)
}
