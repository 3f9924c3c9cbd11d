//! `SQLite` schema definitions for sensorlog.
//!
//! This module contains the SQL statements for creating and querying the
//! `measurements` table.

/// Name of the only table owned by the store.
pub const MEASUREMENTS_TABLE: &str = "measurements";

/// SQL statement to create the measurements table.
pub const CREATE_MEASUREMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS measurements (
    id TEXT PRIMARY KEY,
    lat REAL NOT NULL,
    lon REAL NOT NULL,
    temperature REAL NOT NULL,
    humidity REAL NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    discomfort_index REAL
)
";

/// Columns added after the first release, with their definitions.
///
/// Each is applied with `ALTER TABLE ... ADD COLUMN` when missing.
pub const ADDITIVE_COLUMNS: &[(&str, &str)] = &[("discomfort_index", "REAL")];

/// SQL statement to insert one measurement.
pub const INSERT_MEASUREMENT: &str = r"
INSERT INTO measurements (id, lat, lon, temperature, humidity, date, time, discomfort_index)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

/// SQL query for the table view, in natural table order.
pub const SELECT_TABLE_ROWS: &str = r"
SELECT id, date, time, lat, lon, temperature, humidity, discomfort_index
FROM measurements
";

/// SQL query for plottable rows. Rows with a null numeric field are skipped.
pub const SELECT_MAP_POINTS: &str = r"
SELECT lat, lon, temperature, humidity, discomfort_index
FROM measurements
WHERE lat IS NOT NULL
  AND lon IS NOT NULL
  AND temperature IS NOT NULL
  AND humidity IS NOT NULL
  AND discomfort_index IS NOT NULL
";
