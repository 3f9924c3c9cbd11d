//! Command-line interface for sensorlog.
//!
//! This module provides the CLI structure for the `sensorlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, ExportCommand, ListCommand, MapCommand, OutputFormat,
    PreviewCommand, StatusCommand,
};

/// sensorlog - Log geo-tagged temperature and humidity readings
///
/// Records readings with their discomfort index, lists them as a table,
/// exports CSV and prepares map data.
#[derive(Debug, Parser)]
#[command(name = "sensorlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the database file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database and bring its schema up to date
    Init,

    /// Record a new measurement
    Add(AddCommand),

    /// Show the discomfort index for a temperature and humidity
    Preview(PreviewCommand),

    /// List all recorded measurements
    List(ListCommand),

    /// Export all measurements as CSV
    Export(ExportCommand),

    /// Print map view and plottable points as JSON
    Map(MapCommand),

    /// Show database status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                2 => crate::logging::Verbosity::Debug,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
