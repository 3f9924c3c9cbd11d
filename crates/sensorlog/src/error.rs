//! Error types for sensorlog.
//!
//! This module defines all error types used throughout the sensorlog crate.
//! Input errors are recoverable at the submission boundary; everything else
//! propagates to the caller and aborts the current operation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sensorlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A coordinate could not be parsed as a decimal number.
    #[error("{axis} must be a decimal number, got '{input}'")]
    InvalidCoordinateFormat {
        /// Which coordinate failed ("latitude" or "longitude").
        axis: &'static str,
        /// The raw text that was entered.
        input: String,
    },

    /// A coordinate parsed but lies outside its valid range.
    #[error("{axis} must be between {min} and {max}, got {value}")]
    CoordinateOutOfRange {
        /// Which coordinate failed ("latitude" or "longitude").
        axis: &'static str,
        /// The parsed value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// A temperature or humidity reading lies outside the accepted input range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    ReadingOutOfRange {
        /// Which reading failed ("temperature" or "humidity").
        field: &'static str,
        /// The supplied value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to bring the schema up to date.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A specialized Result type for sensorlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid coordinate format error.
    #[must_use]
    pub fn invalid_coordinate(axis: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidCoordinateFormat {
            axis,
            input: input.into(),
        }
    }

    /// Check if this error came from user input rather than the system.
    ///
    /// Input errors leave the store untouched and are reported back to the
    /// user with the entered values kept.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinateFormat { .. }
                | Self::CoordinateOutOfRange { .. }
                | Self::ReadingOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_display() {
        let err = Error::invalid_coordinate("latitude", "abc");
        assert_eq!(
            err.to_string(),
            "latitude must be a decimal number, got 'abc'"
        );
    }

    #[test]
    fn test_coordinate_out_of_range_display() {
        let err = Error::CoordinateOutOfRange {
            axis: "longitude",
            value: -180.5,
            min: -180.0,
            max: 180.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("longitude"));
        assert!(msg.contains("-180.5"));
    }

    #[test]
    fn test_reading_out_of_range_display() {
        let err = Error::ReadingOutOfRange {
            field: "humidity",
            value: 120.0,
            min: 0.0,
            max: 100.0,
        };
        assert!(err.to_string().contains("humidity"));
    }

    #[test]
    fn test_is_input_error() {
        assert!(Error::invalid_coordinate("latitude", "x").is_input_error());
        assert!(Error::CoordinateOutOfRange {
            axis: "latitude",
            value: 91.0,
            min: -90.0,
            max: 90.0,
        }
        .is_input_error());
        assert!(!Error::DatabaseMigration {
            message: "x".to_string()
        }
        .is_input_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_storage_unavailable_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::StorageUnavailable {
                path: PathBuf::from("/nonexistent/path/db.sqlite"),
                source: sqlite_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/db.sqlite"));
            assert!(!err.is_input_error());
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "file_name must not be empty".to_string(),
        };
        assert!(err.to_string().contains("file_name"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
