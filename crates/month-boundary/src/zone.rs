//! Zone rules: the single local-wall-time → absolute-instant conversion.
//!
//! All zone-aware boundaries go through [`local_to_utc`], so daylight-saving
//! edge cases are resolved in exactly one place:
//!
//! - **fold** (a wall time that occurs twice): [`FoldPolicy::Earlier`] by default
//! - **gap** (a wall time that never occurs): [`GapPolicy::ShiftForward`] by
//!   default, which lands on the first instant after the transition
//!
//! The resolution applied is reported back as a [`LocalResolution`], so callers
//! can tell an exact mapping from a policy decision.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{BoundaryError, Result};

/// Which occurrence of an ambiguous (folded) local time to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldPolicy {
    /// The first occurrence, i.e. the one still on the pre-transition offset.
    #[default]
    Earlier,
    /// The second occurrence, on the post-transition offset.
    ///
    /// When a local month starts inside a fold, this places the start after
    /// the first pass through midnight. Instants from that first pass then
    /// precede the start of their own local month, and the end of the
    /// previous month reads as a wall time in the new one.
    Later,
}

/// What to do with a local time that falls in a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Move forward to the first valid instant (the transition itself).
    #[default]
    ShiftForward,
    /// Fail with [`BoundaryError::NonexistentLocalTime`].
    Reject,
}

/// Options for the `_with_options` zone-aware operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TzOptions {
    pub fold: FoldPolicy,
    pub gap: GapPolicy,
}

/// How a local wall time was mapped to an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocalResolution {
    /// The wall time occurs exactly once.
    Exact,
    /// The wall time occurs twice; `alternative` is the occurrence not chosen.
    Fold { alternative: DateTime<Utc> },
    /// The wall time does not exist; the result's wall time is
    /// `shifted_by_seconds` later than the one requested.
    Gap { shifted_by_seconds: i64 },
}

/// An absolute instant together with the resolution that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedInstant {
    pub instant: DateTime<Utc>,
    pub resolution: LocalResolution,
}

/// Parse an IANA timezone name into [`Tz`].
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| BoundaryError::InvalidTimezone(format!("'{}'", s)))
}

/// The wall-clock reading of `instant` under `zone`.
///
/// # Errors
///
/// Returns [`BoundaryError::OutOfRange`] if the reading falls outside the
/// dates [`NaiveDateTime`] can represent.
pub fn local_wall_time<T: TimeZone, Z: TimeZone>(
    instant: &DateTime<T>,
    zone: &Z,
) -> Result<NaiveDateTime> {
    let utc = instant.naive_utc();
    let offset = TimeDelta::seconds(offset_seconds_at(zone, &utc));
    utc.checked_add_signed(offset)
        .ok_or_else(|| BoundaryError::OutOfRange(format!("wall time of {utc} UTC")))
}

/// Convert a naive local wall time to an absolute instant under `zone`.
///
/// # Errors
///
/// Returns [`BoundaryError::NonexistentLocalTime`] if `local` is in a gap and
/// `options.gap` is [`GapPolicy::Reject`], or if the transition responsible for
/// the gap cannot be located. Returns [`BoundaryError::OutOfRange`] near the
/// limits of the representable range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use month_boundary::zone::{local_to_utc, parse_timezone, LocalResolution, TzOptions};
///
/// let ny = parse_timezone("America/New_York").unwrap();
/// // 02:30 on 2023-03-12 never happens in New York.
/// let local = NaiveDate::from_ymd_opt(2023, 3, 12).unwrap().and_hms_opt(2, 30, 0).unwrap();
/// let resolved = local_to_utc(&ny, &local, &TzOptions::default()).unwrap();
/// assert_eq!(resolved.instant.to_rfc3339(), "2023-03-12T07:00:00+00:00");
/// assert_eq!(resolved.resolution, LocalResolution::Gap { shifted_by_seconds: 1800 });
/// ```
pub fn local_to_utc<Z: TimeZone>(
    zone: &Z,
    local: &NaiveDateTime,
    options: &TzOptions,
) -> Result<ResolvedInstant> {
    match zone.from_local_datetime(local) {
        LocalResult::Single(dt) => Ok(ResolvedInstant {
            instant: dt.with_timezone(&Utc),
            resolution: LocalResolution::Exact,
        }),
        LocalResult::Ambiguous(earliest, latest) => {
            let (chosen, alternative) = match options.fold {
                FoldPolicy::Earlier => (earliest, latest),
                FoldPolicy::Later => (latest, earliest),
            };
            let instant = chosen.with_timezone(&Utc);
            let alternative = alternative.with_timezone(&Utc);
            tracing::debug!(
                %local,
                %instant,
                %alternative,
                policy = ?options.fold,
                "local time is ambiguous"
            );
            Ok(ResolvedInstant {
                instant,
                resolution: LocalResolution::Fold { alternative },
            })
        }
        LocalResult::None => match options.gap {
            GapPolicy::Reject => Err(BoundaryError::NonexistentLocalTime(format!(
                "{local} falls in a daylight-saving gap"
            ))),
            GapPolicy::ShiftForward => {
                let instant = first_instant_after_gap(zone, local)?;
                let wall = local_wall_time(&instant, zone)?;
                let shifted_by_seconds = (wall - *local).num_seconds();
                tracing::debug!(%local, %instant, shifted_by_seconds, "local time is in a gap");
                Ok(ResolvedInstant {
                    instant,
                    resolution: LocalResolution::Gap { shifted_by_seconds },
                })
            }
        },
    }
}

/// The transition instant that opened the gap containing `local`.
///
/// Before the transition the wall clock reads earlier than `local`, from the
/// transition on it reads later, so the transition is found by bisection over
/// whole seconds. Offsets are sampled a day either side of `local`.
fn first_instant_after_gap<Z: TimeZone>(
    zone: &Z,
    local: &NaiveDateTime,
) -> Result<DateTime<Utc>> {
    let out_of_range = || BoundaryError::OutOfRange(format!("gap search around {local}"));
    let day = TimeDelta::days(1);
    let day_before = local.checked_sub_signed(day).ok_or_else(out_of_range)?;
    let day_after = local.checked_add_signed(day).ok_or_else(out_of_range)?;
    let before = offset_seconds_at(zone, &day_before);
    let after = offset_seconds_at(zone, &day_after);
    if before >= after {
        return Err(BoundaryError::NonexistentLocalTime(format!(
            "{local} has no matching transition"
        )));
    }

    let target = local.and_utc().timestamp();
    let reaches_target = |secs: i64| -> Result<bool> {
        let utc = DateTime::from_timestamp(secs, 0).ok_or_else(out_of_range)?;
        Ok(secs + offset_seconds_at(zone, &utc.naive_utc()) >= target)
    };

    // Invariant: `lo` still reads before `local`, `hi` already reads at or after it.
    let mut lo = target - after;
    let mut hi = target - before;
    if reaches_target(lo)? || !reaches_target(hi)? {
        return Err(BoundaryError::NonexistentLocalTime(format!(
            "{local} has no matching transition"
        )));
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if reaches_target(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    DateTime::from_timestamp(hi, 0).ok_or_else(out_of_range)
}

fn offset_seconds_at<Z: TimeZone>(zone: &Z, utc: &NaiveDateTime) -> i64 {
    i64::from(zone.offset_from_utc_datetime(utc).fix().local_minus_utc())
}
