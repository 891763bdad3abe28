//! # month-boundary
//!
//! Deterministic calendar-month boundary arithmetic.
//!
//! Answers "what is the first / last instant of the month containing this
//! timestamp?" in two flavours:
//!
//! - in the timestamp's own fixed UTC offset ([`month`]), where results keep
//!   the input's offset, and
//! - in a named time zone's local calendar ([`tz_month`]), where local
//!   midnights are resolved through the zone's rules (so DST transitions are
//!   handled) and results are absolute UTC instants.
//!
//! Every function is pure: no clock access, no shared state, no I/O. The
//! minimal tick is one nanosecond, so "end of month" is always
//! `start of next month - 1ns`.
//!
//! ## Modules
//!
//! - [`month`] — offset-preserving boundaries
//! - [`tz_month`] — zone-aware boundaries
//! - [`zone`] — local wall time → instant conversion and DST policies
//! - [`calendar`] — month addition and tick arithmetic
//! - [`report`] — RFC 3339 string API with serialisable results
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod month;
pub mod report;
pub mod tz_month;
pub mod zone;

pub use calendar::{add_months, tick};
pub use error::{BoundaryError, Result};
pub use month::{
    end_of_month, end_of_next_month, end_of_previous_month, month_boundary, start_of_month,
    start_of_next_month, start_of_previous_month, Instant, MonthBoundary,
};
pub use report::{
    compute_month_boundaries, compute_month_boundaries_with_options, parse_instant,
    MonthBoundaries,
};
pub use tz_month::{
    end_of_next_tz_month, end_of_previous_tz_month, end_of_tz_month, resolve_tz_month_boundary,
    start_of_next_tz_month, start_of_previous_tz_month, start_of_tz_month, tz_month_boundary,
    tz_month_boundary_with_options,
};
pub use zone::{
    local_to_utc, parse_timezone, FoldPolicy, GapPolicy, LocalResolution, ResolvedInstant,
    TzOptions,
};
