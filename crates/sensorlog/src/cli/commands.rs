//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::validation::{DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Latitude in decimal degrees (e.g. 35.681236)
    #[arg(long, allow_hyphen_values = true, requires = "lon", conflicts_with = "coords")]
    pub lat: Option<String>,

    /// Longitude in decimal degrees (e.g. 139.767125)
    #[arg(long, allow_hyphen_values = true, requires = "lat", conflicts_with = "coords")]
    pub lon: Option<String>,

    /// Coordinates as copied from a map pin (e.g. "35.681236, 139.767125")
    #[arg(long, allow_hyphen_values = true, required_unless_present = "lat")]
    pub coords: Option<String>,

    /// Temperature in °C (-50 to 100)
    #[arg(short, long, allow_negative_numbers = true, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    /// Relative humidity in % (0 to 100)
    #[arg(short = 'H', long, allow_negative_numbers = true, default_value_t = DEFAULT_HUMIDITY)]
    pub humidity: f64,

    /// Observation date, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Observation time, HH:MM or HH:MM:SS (defaults to the configured time)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    /// Save without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Preview command arguments.
#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Temperature in °C
    #[arg(short, long, allow_negative_numbers = true, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    /// Relative humidity in %
    #[arg(short = 'H', long, allow_negative_numbers = true, default_value_t = DEFAULT_HUMIDITY)]
    pub humidity: f64,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file (defaults to the configured file name)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write CSV to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Emit a GeoJSON FeatureCollection instead of view and points
    #[arg(short, long)]
    pub geojson: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Table,
    /// JSON array
    Json,
    /// CSV with header row
    Csv,
}

/// Parse a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns a message if the text matches neither form.
pub fn parse_time(text: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| format!("invalid time '{text}', expected HH:MM or HH:MM:SS"))
}
