//! Core record types for sensorlog.
//!
//! A [`Measurement`] is a validated reading ready to be stored. Rows read back
//! from the store come in two shapes: [`TableRow`] for tabular display and CSV
//! export, and [`MapPoint`] for plotting.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::discomfort::discomfort_index;

/// Text format used to store observation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text format used to store observation times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Generate a fresh record identifier.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// A validated measurement with its derived discomfort index.
///
/// Values of this type are only produced by [`EntryForm::validate`], so the
/// coordinate and reading bounds always hold. The discomfort index is fixed
/// at construction.
///
/// [`EntryForm::validate`]: crate::validation::EntryForm::validate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    latitude: f64,
    longitude: f64,
    temperature: f64,
    humidity: f64,
    date: NaiveDate,
    time: NaiveTime,
    discomfort_index: f64,
}

impl Measurement {
    pub(crate) fn new(
        latitude: f64,
        longitude: f64,
        temperature: f64,
        humidity: f64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            latitude,
            longitude,
            temperature,
            humidity,
            date,
            time,
            discomfort_index: discomfort_index(temperature, humidity),
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Relative humidity in percent.
    #[must_use]
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Observation date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Observation time of day.
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Discomfort index computed when the measurement was accepted.
    #[must_use]
    pub fn discomfort_index(&self) -> f64 {
        self.discomfort_index
    }

    /// Observation date in its stored text form.
    #[must_use]
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Observation time in its stored text form.
    #[must_use]
    pub fn time_text(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} @ ({}, {}): {:.2} °C, {:.2} %, discomfort index {:.2}",
            self.date_text(),
            self.time_text(),
            self.latitude,
            self.longitude,
            self.temperature,
            self.humidity,
            self.discomfort_index
        )
    }
}

/// A stored record as shown in the table view and CSV export.
///
/// Field names are the display headers. Legacy rows may carry nulls, which
/// serialize as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Record identifier. The column is nullable in databases written by
    /// other tools.
    #[serde(rename = "ID")]
    pub id: Option<String>,
    /// Observation date.
    #[serde(rename = "Date")]
    pub date: Option<String>,
    /// Observation time of day.
    #[serde(rename = "Time")]
    pub time: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    /// Temperature in degrees Celsius.
    #[serde(rename = "Temperature (°C)")]
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    #[serde(rename = "Humidity (%)")]
    pub humidity: Option<f64>,
    /// Stored discomfort index, absent for legacy rows.
    #[serde(rename = "Discomfort Index")]
    pub discomfort_index: Option<f64>,
}

/// A fully populated record for plotting on a map.
///
/// Field names match the table columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Stored discomfort index.
    pub discomfort_index: f64,
}
