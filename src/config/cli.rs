//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lanwatch: router device presence bot
///
/// Polls a Linksys router for connected devices and reports arrivals and
/// departures to subscribed Telegram users.
#[derive(Debug, Parser)]
#[command(name = "lanwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Telegram bot token (required for run mode)
    #[arg(long, short, global = true)]
    pub token: Option<String>,

    /// Comma-separated display names allowed to use the bot (empty = everyone)
    #[arg(long = "access-list", short, value_name = "NAMES", value_delimiter = ',')]
    pub access_list: Vec<String>,

    /// JSON file mapping device ids to display names
    #[arg(long = "uid-table", short, value_name = "PATH")]
    pub uid_table: Option<PathBuf>,

    /// Router address (host or host:port)
    #[arg(long)]
    pub router: Option<String>,

    /// Router polling interval in seconds
    #[arg(long = "poll-interval")]
    pub poll_interval: Option<u64>,

    /// Path to the subscription state file
    #[arg(long = "state-file")]
    pub state_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    pub debug: bool,
}

/// Subcommands for lanwatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "lanwatch.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
