use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = convite_core::config::parse_override(s)?;
        Ok(Self { key, value })
    }
}

fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("expected an RFC 3339 timestamp, got {s:?}: {e}"))
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "convite",
    version,
    about = "Convite: invitation pages from the terminal",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Site configuration file.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Alternative invitations TOML file.
    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[arg(
        long = "set",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub overrides: Vec<KeyVal>,

    /// Pretend the current instant is this RFC 3339 timestamp.
    #[arg(long = "now", value_parser = parse_instant, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Every invitation, as on the selector page.
    List,
    /// Countdown, calendar, itinerary and sections of one invitation.
    Show { id: String },
    /// Keep the countdown and itinerary ticking.
    Watch {
        id: String,
        /// Stop after this many countdown ticks.
        #[arg(long = "ticks")]
        ticks: Option<u64>,
    },
    /// Write the calendar file; `-` prints it.
    Ics {
        id: String,
        #[arg(long = "out", short = 'o')]
        out: Option<PathBuf>,
    },
    /// Maps, sharing, calendar and contact links.
    Links { id: String },
    /// Validate the invitation data.
    Check,
    /// Run the access gate for a path against a session file.
    Gate {
        path: String,
        #[arg(long = "admin")]
        admin: Option<String>,
        #[arg(long = "state")]
        state: Option<PathBuf>,
    },
}

/// Filter used when `RUST_LOG` is unset. `-v` raises only the convite
/// crates; dependencies stay at `warn`.
fn default_filter(verbose: u8, quiet: u8) -> String {
    let level = match (quiet, verbose) {
        (2.., _) => return "error".to_string(),
        (1, _) | (0, 0) => return "warn".to_string(),
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };
    format!("warn,convite_core={level},convite_cli={level}")
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose, quiet)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
