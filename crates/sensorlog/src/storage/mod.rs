//! Storage layer for sensorlog.
//!
//! This module provides `SQLite`-based persistent storage for measurements.
//! A connection is opened for each logical operation and closed when it
//! returns, whether it succeeded or not.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::measurement::{generate_id, MapPoint, Measurement, TableRow};

use schema::{INSERT_MEASUREMENT, SELECT_MAP_POINTS, SELECT_TABLE_ROWS};

/// Store for measurement records.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Schema presence checks with additive column migration
/// - Appending validated measurements under fresh identifiers
/// - Full reads for the table view and for map plotting
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
}

impl Store {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then ensures the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema check
    /// fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let store = Self { path };
        store.ensure_schema()?;

        info!("Store opened at {}", store.path.display());
        Ok(store)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        debug!("Opening database at {}", self.path.display());
        let conn = Connection::open(&self.path).map_err(|source| Error::StorageUnavailable {
            path: self.path.clone(),
            source,
        })?;
        Ok(conn)
    }

    /// Ensure the measurements table and all its columns exist.
    ///
    /// Idempotent; [`Store::open`] already calls it once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or the schema cannot be
    /// brought up to date.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::ensure_schema(&conn)
    }

    /// Insert a measurement under a freshly generated identifier.
    ///
    /// Returns the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, measurement: &Measurement) -> Result<String> {
        let conn = self.connect()?;
        let id = generate_id();

        conn.execute(
            INSERT_MEASUREMENT,
            params![
                id,
                measurement.latitude(),
                measurement.longitude(),
                measurement.temperature(),
                measurement.humidity(),
                measurement.date_text(),
                measurement.time_text(),
                measurement.discomfort_index(),
            ],
        )?;

        debug!("Inserted measurement with id {}", id);
        Ok(id)
    }

    /// Load every stored record for the table view.
    ///
    /// Rows come back in natural table order. Nulls in legacy rows are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn load_all(&self) -> Result<Vec<TableRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_TABLE_ROWS)?;

        let rows = stmt
            .query_map([], Self::row_to_table_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} rows", rows.len());
        Ok(rows)
    }

    /// Load every record that can be plotted.
    ///
    /// Rows with a null coordinate, reading or discomfort index are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn load_for_map(&self) -> Result<Vec<MapPoint>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_MAP_POINTS)?;

        let points = stmt
            .query_map([], Self::row_to_map_point)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} map points", points.len());
        Ok(points)
    }

    /// Count stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM measurements", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    fn row_to_table_row(row: &rusqlite::Row) -> rusqlite::Result<TableRow> {
        Ok(TableRow {
            id: row.get(0)?,
            date: row.get(1)?,
            time: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            temperature: row.get(5)?,
            humidity: row.get(6)?,
            discomfort_index: row.get(7)?,
        })
    }

    fn row_to_map_point(row: &rusqlite::Row) -> rusqlite::Result<MapPoint> {
        Ok(MapPoint {
            lat: row.get(0)?,
            lon: row.get(1)?,
            temperature: row.get(2)?,
            humidity: row.get(3)?,
            discomfort_index: row.get(4)?,
        })
    }
}
