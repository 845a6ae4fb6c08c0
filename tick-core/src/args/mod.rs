//! Defines the command-line arguments shared by every tick store tool.
//!
//! Tools flatten `CommonArgs` into their own parser so that configuration and
//! data directories are spelled the same way everywhere.

use clap::{Args, Command, FromArgMatches};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Flattened into each tool's parser; must not carry command-level attributes.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct CommonArgs {
    /// Path to the configuration directory (holds `store.json`)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Path to the data directory (tick data and instrument registry)
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
}

impl CommonArgs {
    /// Parses command-line arguments into a `CommonArgs` struct.
    ///
    /// This function automatically handles `--help` via `clap`. If arguments
    /// are invalid, it prints an error and exits.
    pub fn parse_args(args: Vec<String>) -> Self {
        let matches = Self::augment_args(Command::new("tick-tool")).get_matches_from(args);
        Self::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
    }

    /// Returns the path to the configuration directory.
    pub fn get_config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Returns the path to the data directory.
    ///
    /// This directory holds the tick snapshot and `instruments.json`.
    pub fn get_data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }
}
