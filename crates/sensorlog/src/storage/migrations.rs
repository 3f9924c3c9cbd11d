//! Schema presence checks for sensorlog.
//!
//! There is no version table. The store inspects the catalog on every open,
//! creates the table when absent and adds any column from
//! [`ADDITIVE_COLUMNS`] that an older database is missing.

use rusqlite::Connection;
use tracing::info;

use crate::error::{Error, Result};

use super::schema::{ADDITIVE_COLUMNS, CREATE_MEASUREMENTS_TABLE, MEASUREMENTS_TABLE};

/// Ensure the measurements table exists with every expected column.
///
/// Safe to call any number of times; existing rows are never touched.
///
/// # Errors
///
/// Returns an error if table creation, introspection or a column addition
/// fails.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_MEASUREMENTS_TABLE, [])?;

    let existing = column_names(conn, MEASUREMENTS_TABLE)?;
    for (name, definition) in ADDITIVE_COLUMNS {
        if !existing.iter().any(|c| c == name) {
            add_column(conn, MEASUREMENTS_TABLE, name, definition)?;
        }
    }

    Ok(())
}

/// List the column names of a table via `PRAGMA table_info`.
///
/// Returns an empty list if the table does not exist.
pub(crate) fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names)
}

fn add_column(conn: &Connection, table: &str, name: &str, definition: &str) -> Result<()> {
    conn.execute(
        &format!("ALTER TABLE {table} ADD COLUMN {name} {definition}"),
        [],
    )
    .map_err(|e| Error::DatabaseMigration {
        message: format!("failed to add column {name} to {table}: {e}"),
    })?;
    info!("Added missing column {} to {}", name, table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    fn create_legacy_table(conn: &Connection) {
        conn.execute(
            r"
            CREATE TABLE measurements (
                id TEXT PRIMARY KEY,
                lat REAL NOT NULL,
                lon REAL NOT NULL,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL
            )
            ",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_ensure_schema_creates_table() {
        let conn = create_test_db();
        ensure_schema(&conn).expect("failed to ensure schema");

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='measurements'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);

        let columns = column_names(&conn, MEASUREMENTS_TABLE).unwrap();
        assert_eq!(
            columns,
            vec![
                "id",
                "lat",
                "lon",
                "temperature",
                "humidity",
                "date",
                "time",
                "discomfort_index"
            ]
        );
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let conn = create_test_db();

        ensure_schema(&conn).expect("first ensure failed");
        let before = column_names(&conn, MEASUREMENTS_TABLE).unwrap();
        ensure_schema(&conn).expect("second ensure failed");
        let after = column_names(&conn, MEASUREMENTS_TABLE).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_ensure_schema_adds_missing_column() {
        let conn = create_test_db();
        create_legacy_table(&conn);
        conn.execute(
            "INSERT INTO measurements VALUES ('a', 1.0, 2.0, 20.0, 50.0, '2024-01-01', '12:00:00')",
            [],
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let columns = column_names(&conn, MEASUREMENTS_TABLE).unwrap();
        assert!(columns.iter().any(|c| c == "discomfort_index"));

        let (count, di): (i64, Option<f64>) = conn
            .query_row(
                "SELECT COUNT(*), MAX(discomfort_index) FROM measurements",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert!(di.is_none());
    }

    #[test]
    fn test_ensure_schema_on_legacy_table_twice() {
        let conn = create_test_db();
        create_legacy_table(&conn);

        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let columns = column_names(&conn, MEASUREMENTS_TABLE).unwrap();
        let di_columns = columns.iter().filter(|c| *c == "discomfort_index").count();
        assert_eq!(di_columns, 1);
    }

    #[test]
    fn test_column_names_missing_table() {
        let conn = create_test_db();
        let columns = column_names(&conn, "nope").unwrap();
        assert!(columns.is_empty());
    }
}
