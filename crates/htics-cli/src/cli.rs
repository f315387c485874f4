//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// htics - HackerTracker schedule to iCalendar
#[derive(Debug, Parser)]
#[command(name = "htics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "HTICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output (on stderr)
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Write the calendar to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Conference code to export (e.g. MOCA2024)
    #[arg(long)]
    pub conference: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
