//! Input validation for new measurements.
//!
//! Coordinates arrive as raw text (usually pasted from a map), readings as
//! numbers. [`EntryForm::validate`] turns a form into a [`Measurement`] or an
//! input error; nothing here touches storage.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::Serialize;

use crate::discomfort::discomfort_index;
use crate::error::{Error, Result};
use crate::measurement::Measurement;

/// Valid latitudes in decimal degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitudes in decimal degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Accepted temperature input in degrees Celsius.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = -50.0..=100.0;

/// Accepted relative humidity input in percent.
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Temperature offered on a fresh form.
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Humidity offered on a fresh form.
pub const DEFAULT_HUMIDITY: f64 = 60.0;

/// Parse a latitude from user text.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinateFormat`] if the text is not a number and
/// [`Error::CoordinateOutOfRange`] if it lies outside [`LATITUDE_RANGE`].
pub fn parse_latitude(text: &str) -> Result<f64> {
    parse_coordinate("latitude", text, &LATITUDE_RANGE)
}

/// Parse a longitude from user text.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinateFormat`] if the text is not a number and
/// [`Error::CoordinateOutOfRange`] if it lies outside [`LONGITUDE_RANGE`].
pub fn parse_longitude(text: &str) -> Result<f64> {
    parse_coordinate("longitude", text, &LONGITUDE_RANGE)
}

fn parse_coordinate(axis: &'static str, text: &str, range: &RangeInclusive<f64>) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::invalid_coordinate(axis, text))?;

    // NaN fails `contains`, so it is reported as out of range.
    if !range.contains(&value) {
        return Err(Error::CoordinateOutOfRange {
            axis,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(value)
}

/// Check a temperature or humidity reading against its input range.
///
/// # Errors
///
/// Returns [`Error::ReadingOutOfRange`] if the value lies outside `range`.
pub fn check_reading(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<f64> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Error::ReadingOutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn coordinate_pair_regex() -> &'static Regex {
    static PAIR: OnceLock<Regex> = OnceLock::new();
    PAIR.get_or_init(|| {
        Regex::new(r"^\s*\(?\s*([^,\s()]+)\s*,\s*([^,\s()]+)\s*\)?\s*$")
            .expect("Invalid regex pattern")
    })
}

/// Split a pasted `"lat, lon"` pair into its two halves.
///
/// Map applications copy a pin's location as `35.681236, 139.767125`,
/// sometimes wrapped in parentheses. The halves are returned unparsed.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinateFormat`] if the text is not two
/// comma-separated values.
pub fn split_coordinate_pair(text: &str) -> Result<(String, String)> {
    coordinate_pair_regex()
        .captures(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .ok_or_else(|| Error::invalid_coordinate("coordinates", text))
}

/// Raw values entered for one measurement.
///
/// The form keeps exactly what the user typed so a rejected submission can be
/// corrected without re-entering everything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryForm {
    /// Latitude text as entered.
    pub latitude: String,
    /// Longitude text as entered.
    pub longitude: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Observation date.
    pub date: NaiveDate,
    /// Observation time of day.
    pub time: NaiveTime,
}

impl EntryForm {
    /// Create an empty form with the given default date and time.
    #[must_use]
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            latitude: String::new(),
            longitude: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            humidity: DEFAULT_HUMIDITY,
            date,
            time,
        }
    }

    /// Set the coordinate text fields.
    #[must_use]
    pub fn with_coordinates(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.latitude = latitude.into();
        self.longitude = longitude.into();
        self
    }

    /// Set the temperature and humidity readings.
    #[must_use]
    pub fn with_reading(mut self, temperature: f64, humidity: f64) -> Self {
        self.temperature = temperature;
        self.humidity = humidity;
        self
    }

    /// Fill both coordinate fields from a pasted `"lat, lon"` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinateFormat`] if the text is not a pair.
    /// The form is left unchanged in that case.
    pub fn set_coordinate_pair(&mut self, text: &str) -> Result<()> {
        let (latitude, longitude) = split_coordinate_pair(text)?;
        self.latitude = latitude;
        self.longitude = longitude;
        Ok(())
    }

    /// Check the temperature and humidity against their input ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadingOutOfRange`] for the first reading out of range.
    pub fn readings(&self) -> Result<(f64, f64)> {
        let temperature = check_reading("temperature", self.temperature, &TEMPERATURE_RANGE)?;
        let humidity = check_reading("humidity", self.humidity, &HUMIDITY_RANGE)?;
        Ok((temperature, humidity))
    }

    /// Discomfort index for the current readings.
    ///
    /// Coordinates are not needed, so this works on a half-filled form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadingOutOfRange`] if a reading is out of range.
    pub fn preview_discomfort_index(&self) -> Result<f64> {
        let (temperature, humidity) = self.readings()?;
        Ok(discomfort_index(temperature, humidity))
    }

    /// Validate the form and derive the measurement to store.
    ///
    /// Latitude is checked before longitude, and coordinates before readings.
    ///
    /// # Errors
    ///
    /// Returns the first input error found.
    pub fn validate(&self) -> Result<Measurement> {
        let latitude = parse_latitude(&self.latitude)?;
        let longitude = parse_longitude(&self.longitude)?;
        let (temperature, humidity) = self.readings()?;

        Ok(Measurement::new(
            latitude,
            longitude,
            temperature,
            humidity,
            self.date,
            self.time,
        ))
    }
}
