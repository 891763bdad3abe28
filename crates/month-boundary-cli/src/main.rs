//! `month-boundary` — print the calendar-month boundaries of a datetime.

mod logger;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use month_boundary::{
    compute_month_boundaries_with_options, FoldPolicy, GapPolicy, MonthBoundary, TzOptions,
};

#[derive(Parser, Debug)]
#[command(
    name = "month-boundary",
    version,
    about = "Compute the start and end of the month containing a datetime"
)]
struct Cli {
    /// RFC 3339 datetime, e.g. 2023-11-01T12:00:00Z
    datetime: String,

    /// IANA timezone whose local calendar defines the month (results in UTC).
    /// Without it the datetime's own offset is used and kept.
    #[arg(short = 't', long = "tz")]
    timezone: Option<String>,

    /// Print a single boundary instead of the full JSON report
    #[arg(short, long, value_enum)]
    boundary: Option<BoundaryArg>,

    /// Which occurrence to use when a local midnight is ambiguous
    #[arg(long, value_enum, default_value_t = FoldArg::Earlier)]
    fold: FoldArg,

    /// What to do when a local midnight does not exist
    #[arg(long, value_enum, default_value_t = GapArg::ShiftForward)]
    gap: GapArg,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Log DST resolution details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BoundaryArg {
    StartOfMonth,
    EndOfMonth,
    StartOfNextMonth,
    EndOfNextMonth,
    StartOfPreviousMonth,
    EndOfPreviousMonth,
}

impl From<BoundaryArg> for MonthBoundary {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::StartOfMonth => MonthBoundary::StartOfMonth,
            BoundaryArg::EndOfMonth => MonthBoundary::EndOfMonth,
            BoundaryArg::StartOfNextMonth => MonthBoundary::StartOfNextMonth,
            BoundaryArg::EndOfNextMonth => MonthBoundary::EndOfNextMonth,
            BoundaryArg::StartOfPreviousMonth => MonthBoundary::StartOfPreviousMonth,
            BoundaryArg::EndOfPreviousMonth => MonthBoundary::EndOfPreviousMonth,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FoldArg {
    Earlier,
    Later,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GapArg {
    ShiftForward,
    Reject,
}

impl Cli {
    fn options(&self) -> TzOptions {
        TzOptions {
            fold: match self.fold {
                FoldArg::Earlier => FoldPolicy::Earlier,
                FoldArg::Later => FoldPolicy::Later,
            },
            gap: match self.gap {
                GapArg::ShiftForward => GapPolicy::ShiftForward,
                GapArg::Reject => GapPolicy::Reject,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let boundaries = compute_month_boundaries_with_options(
        &cli.datetime,
        cli.timezone.as_deref(),
        &cli.options(),
    )
    .with_context(|| format!("cannot compute month boundaries for '{}'", cli.datetime))?;

    if let Some(boundary) = cli.boundary {
        println!("{}", boundaries.get(boundary.into()));
        return Ok(());
    }

    let json = if cli.compact {
        serde_json::to_string(&boundaries)?
    } else {
        serde_json::to_string_pretty(&boundaries)?
    };
    println!("{json}");
    Ok(())
}
