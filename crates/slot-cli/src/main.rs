//! `slots` CLI: find common meeting times in a JSON calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Five one-hour slots where Alice and Bob are both free
//! slots find -c team.json -p $ALICE -p $BOB \
//!     --start 2023-05-01T09:00 --end 2023-05-01T17:00
//!
//! # 30-minute slots, local Berlin times, as plain text
//! slots find -c team.json -p $ALICE --start 2023-05-01T09:00 --end 2023-05-01T17:00 \
//!     --timezone Europe/Berlin --duration 30 --max-results 10 --format text
//!
//! # Merged busy/free timeline for the group
//! slots timeline -c team.json -p $ALICE -p $BOB --start 2023-05-01T09:00 --end 2023-05-01T17:00
//!
//! # List users in the calendar
//! slots users -c team.json --format text
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

mod calendar_file;
mod datetime;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use clap::{Args, Parser, Subcommand, ValueEnum};
use slot_engine::{
    AvailabilityEngine, InMemoryCalendar, ParticipantId, TimeRange, User, DEFAULT_MAX_RESULTS,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::calendar_file::CalendarFile;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find meeting slots that suit every participant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find candidate slots of a fixed length
    Find {
        #[command(flatten)]
        query: GroupQuery,
        /// Meeting length in minutes
        #[arg(short, long, default_value_t = 60)]
        duration: i64,
        /// Maximum number of slots to return
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },
    /// Show merged busy time and free gaps
    Timeline {
        #[command(flatten)]
        query: GroupQuery,
    },
    /// List the users in a calendar file
    Users {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct GroupQuery {
    /// Calendar JSON file
    #[arg(short, long)]
    calendar: PathBuf,
    /// Participant user id (repeatable)
    #[arg(short, long = "participant", required = true)]
    participants: Vec<ParticipantId>,
    /// Window start (RFC 3339, or local time in --timezone)
    #[arg(long)]
    start: String,
    /// Window end (RFC 3339, or local time in --timezone)
    #[arg(long)]
    end: String,
    /// IANA timezone for datetimes without an offset
    #[arg(long, default_value = "UTC")]
    timezone: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Output file (writes to stdout if omitted)
    #[arg(short = 'o', long = "output")]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Find {
            query,
            duration,
            max_results,
        } => {
            let duration = Duration::try_minutes(duration)
                .with_context(|| format!("Duration out of range: {} min", duration))?;
            let (engine, participants, window) = prepare(&query)?;
            let slots = engine
                .find_available_slots(&participants, window, duration, max_results)
                .await
                .context("Failed to find available slots")?;
            tracing::info!(found = slots.len(), "slot search complete");

            let rendered = match query.output.format {
                Format::Json => serde_json::to_string_pretty(&slots)?,
                Format::Text => render_ranges(&slots),
            };
            write_output(query.output.file.as_deref(), &rendered)?;
        }
        Commands::Timeline { query } => {
            let (engine, participants, window) = prepare(&query)?;
            let timeline = engine
                .timeline(&participants, window)
                .await
                .context("Failed to compute timeline")?;

            let rendered = match query.output.format {
                Format::Json => serde_json::to_string_pretty(&timeline)?,
                Format::Text => format!(
                    "window: {}\nbusy:\n{}free:\n{}",
                    timeline.window,
                    indent(&render_ranges(&timeline.busy)),
                    indent(&render_ranges(&timeline.free)),
                ),
            };
            write_output(query.output.file.as_deref(), &rendered)?;
        }
        Commands::Users { calendar, output } => {
            let calendar = load_calendar(&calendar)?;
            let users: Vec<&User> = calendar.users().collect();

            let rendered = match output.format {
                Format::Json => serde_json::to_string_pretty(&users)?,
                Format::Text => users
                    .iter()
                    .map(|u| format!("{}  {} <{}>\n", u.id(), u.name(), u.email()))
                    .collect(),
            };
            write_output(output.file.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, json_logs: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(filter);

    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the calendar, check every participant exists, and parse the window.
fn prepare(
    query: &GroupQuery,
) -> Result<(AvailabilityEngine<InMemoryCalendar>, Vec<ParticipantId>, TimeRange)> {
    let calendar = load_calendar(&query.calendar)?;

    for id in &query.participants {
        if calendar.user(*id).is_none() {
            anyhow::bail!("User with ID {} not found", id);
        }
    }

    let tz = datetime::parse_timezone(&query.timezone)?;
    let start = datetime::parse_datetime(&query.start, tz)?;
    let end = datetime::parse_datetime(&query.end, tz)?;
    let window = TimeRange::new(start, end).context("Invalid search window")?;

    Ok((
        AvailabilityEngine::new(calendar),
        query.participants.clone(),
        window,
    ))
}

fn load_calendar(path: &Path) -> Result<InMemoryCalendar> {
    let calendar = CalendarFile::load(path)?.into_calendar()?;
    tracing::debug!(
        path = %path.display(),
        users = calendar.users().count(),
        "loaded calendar"
    );
    Ok(calendar)
}

fn render_ranges(ranges: &[TimeRange]) -> String {
    ranges.iter().map(|r| format!("{}\n", r)).collect()
}

fn indent(block: &str) -> String {
    block.lines().map(|line| format!("  {}\n", line)).collect()
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content.trim_end());
        }
    }
    Ok(())
}
