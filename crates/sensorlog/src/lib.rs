//! `sensorlog` - A geo-tagged temperature and humidity log
//!
//! This library provides the core functionality for recording sensor readings
//! with their discomfort index in SQLite, listing and exporting them, and
//! preparing the stored points for a map.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod discomfort;
pub mod error;
pub mod export;
pub mod logging;
pub mod map;
pub mod measurement;
pub mod storage;
pub mod submission;
pub mod validation;

pub use config::Config;
pub use discomfort::discomfort_index;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use map::MapView;
pub use measurement::{MapPoint, Measurement, TableRow};
pub use storage::Store;
pub use submission::{ConfirmationPolicy, Submission, SubmitOutcome};
pub use validation::EntryForm;
