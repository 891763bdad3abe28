//! String-level API: RFC 3339 in, serialisable boundaries out.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::Serialize;

use crate::error::{BoundaryError, Result};
use crate::month::{month_boundary, Instant, MonthBoundary};
use crate::tz_month::resolve_tz_month_boundary;
use crate::zone::{parse_timezone, LocalResolution, TzOptions};

/// All six month boundaries of one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBoundaries {
    /// The datetime as given.
    pub input: String,
    /// The IANA zone whose calendar was used; absent for the instant's own offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub start_of_month: String,
    pub end_of_month: String,
    pub start_of_next_month: String,
    pub end_of_next_month: String,
    pub start_of_previous_month: String,
    pub end_of_previous_month: String,
    /// Elapsed seconds from this month's start to the next month's start.
    pub month_length_seconds: i64,
    /// How the local midnight starting the month was resolved (zone only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_resolution: Option<LocalResolution>,
    /// How the local midnight starting the next month was resolved (zone only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_resolution: Option<LocalResolution>,
}

impl MonthBoundaries {
    /// The rendered value of a single boundary.
    pub fn get(&self, boundary: MonthBoundary) -> &str {
        match boundary {
            MonthBoundary::StartOfMonth => &self.start_of_month,
            MonthBoundary::EndOfMonth => &self.end_of_month,
            MonthBoundary::StartOfNextMonth => &self.start_of_next_month,
            MonthBoundary::EndOfNextMonth => &self.end_of_next_month,
            MonthBoundary::StartOfPreviousMonth => &self.start_of_previous_month,
            MonthBoundary::EndOfPreviousMonth => &self.end_of_previous_month,
        }
    }
}

/// Parse an RFC 3339 datetime, keeping its offset.
pub fn parse_instant(s: &str) -> Result<Instant> {
    DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| BoundaryError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// RFC 3339 with as many fractional digits as needed (none at whole seconds).
pub fn format_instant<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: Display,
{
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Compute every month boundary of `datetime`.
///
/// Without a `timezone` the boundaries are taken in the datetime's own offset
/// and rendered with it. With one, they are taken in that zone's local calendar
/// and rendered in UTC.
///
/// # Errors
///
/// Returns [`BoundaryError::InvalidDatetime`] if `datetime` is not RFC 3339,
/// [`BoundaryError::InvalidTimezone`] for an unknown zone name, or
/// [`BoundaryError::OutOfRange`] near the limits of the calendar.
///
/// # Examples
///
/// ```
/// use month_boundary::report::compute_month_boundaries;
///
/// let b = compute_month_boundaries("2024-02-10T08:00:00+01:00", None).unwrap();
/// assert_eq!(b.end_of_month, "2024-02-29T23:59:59.999999999+01:00");
///
/// let ny = Some("America/New_York");
/// let b = compute_month_boundaries("2023-11-01T12:00:00Z", ny).unwrap();
/// assert_eq!(b.start_of_month, "2023-11-01T04:00:00Z");
/// assert_eq!(b.end_of_month, "2023-12-01T04:59:59.999999999Z");
/// ```
pub fn compute_month_boundaries(
    datetime: &str,
    timezone: Option<&str>,
) -> Result<MonthBoundaries> {
    compute_month_boundaries_with_options(datetime, timezone, &TzOptions::default())
}

/// [`compute_month_boundaries`] with explicit DST policies.
pub fn compute_month_boundaries_with_options(
    datetime: &str,
    timezone: Option<&str>,
    options: &TzOptions,
) -> Result<MonthBoundaries> {
    let instant = parse_instant(datetime)?;

    let Some(name) = timezone else {
        let at = |boundary| month_boundary(instant, boundary);
        let start = at(MonthBoundary::StartOfMonth)?;
        let next = at(MonthBoundary::StartOfNextMonth)?;
        return Ok(MonthBoundaries {
            input: datetime.to_string(),
            timezone: None,
            start_of_month: format_instant(&start),
            end_of_month: format_instant(&at(MonthBoundary::EndOfMonth)?),
            start_of_next_month: format_instant(&next),
            end_of_next_month: format_instant(&at(MonthBoundary::EndOfNextMonth)?),
            start_of_previous_month: format_instant(&at(MonthBoundary::StartOfPreviousMonth)?),
            end_of_previous_month: format_instant(&at(MonthBoundary::EndOfPreviousMonth)?),
            month_length_seconds: (next - start).num_seconds(),
            start_resolution: None,
            end_resolution: None,
        });
    };

    let tz = parse_timezone(name)?;
    let resolve = |boundary| resolve_tz_month_boundary(instant, &tz, boundary, options);
    let at = |boundary| resolve(boundary).map(|r| format_instant(&r.instant));
    let start = resolve(MonthBoundary::StartOfMonth)?;
    let next = resolve(MonthBoundary::StartOfNextMonth)?;

    Ok(MonthBoundaries {
        input: datetime.to_string(),
        timezone: Some(name.to_string()),
        start_of_month: format_instant(&start.instant),
        end_of_month: at(MonthBoundary::EndOfMonth)?,
        start_of_next_month: format_instant(&next.instant),
        end_of_next_month: at(MonthBoundary::EndOfNextMonth)?,
        start_of_previous_month: at(MonthBoundary::StartOfPreviousMonth)?,
        end_of_previous_month: at(MonthBoundary::EndOfPreviousMonth)?,
        month_length_seconds: (next.instant - start.instant).num_seconds(),
        start_resolution: Some(start.resolution),
        end_resolution: Some(next.resolution),
    })
}
