use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tick_core::args::CommonArgs;

/// Command line of the tick store operator toolkit.
#[derive(Parser, Debug)]
#[command(name = "tick-feed")]
#[command(about = "Tick store operator toolkit", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands. Timestamps are RFC 3339 (e.g. `2024-01-02T00:00:00Z`).
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append synthetic random-walk ticks.
    Generate {
        /// Number of instruments quoted in every tick.
        #[arg(short, long, default_value_t = 3)]
        instruments: usize,

        /// Number of ticks to generate.
        #[arg(short, long, default_value_t = 100)]
        count: usize,

        /// Seconds between consecutive ticks.
        #[arg(long, default_value_t = 60)]
        interval_secs: i64,

        /// Timestamp of the first tick (default: now).
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },
    /// Print the first and last stored timestamp.
    Extent,
    /// Print every tick in [from, to).
    Fetch {
        #[arg(long)]
        from: DateTime<Utc>,

        #[arg(long)]
        to: DateTime<Utc>,

        /// Only print this instrument.
        #[arg(long)]
        instrument: Option<String>,
    },
    /// Delete every tick in [from, to). Swap data is kept.
    Delete {
        #[arg(long)]
        from: DateTime<Utc>,

        #[arg(long)]
        to: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from([
            "tick-feed",
            "--data-dir",
            "/tmp/ticks",
            "fetch",
            "--from",
            "2024-01-01T00:00:00Z",
            "--to",
            "2024-01-02T00:00:00Z",
            "--instrument",
            "USD/JPY",
        ]);

        match cli.command {
            Commands::Fetch {
                from,
                to,
                instrument,
            } => {
                assert_eq!(to - from, chrono::Duration::days(1));
                assert_eq!(instrument.as_deref(), Some("USD/JPY"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["tick-feed", "generate"]);
        match cli.command {
            Commands::Generate {
                instruments,
                count,
                interval_secs,
                start,
            } => {
                assert_eq!((instruments, count, interval_secs), (3, 100, 60));
                assert!(start.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
