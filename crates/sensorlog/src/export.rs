//! CSV, JSON and plain-text renderings of the table view.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::measurement::TableRow;

/// Write rows as UTF-8 CSV with a header row of display names.
///
/// Missing values are written as empty cells. An empty slice produces a
/// header-only file.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_csv<W: Write>(rows: &[TableRow], writer: W) -> Result<()> {
    // Headers written by hand so an empty table still gets one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows as CSV to a new file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv_file(rows: &[TableRow], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(rows, BufWriter::new(file))
}

/// Write rows as a pretty-printed JSON array keyed by display names.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_json<W: Write>(rows: &[TableRow], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Render rows as a CSV string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_csv_string(rows: &[TableRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    // csv only ever writes valid UTF-8 from UTF-8 input
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render rows as an aligned plain-text table.
///
/// Numbers are shown with two decimals, coordinates with six. Missing values
/// are left blank.
#[must_use]
pub fn render_table(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 8]> = rows
        .iter()
        .map(|r| {
            [
                r.id.clone().unwrap_or_default(),
                r.date.clone().unwrap_or_default(),
                r.time.clone().unwrap_or_default(),
                fmt_number(r.latitude, 6),
                fmt_number(r.longitude, 6),
                fmt_number(r.temperature, 2),
                fmt_number(r.humidity, 2),
                fmt_number(r.discomfort_index, 2),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn fmt_number(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.decimals$}"))
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Header row, matching the serde names on [`TableRow`].
const HEADERS: [&str; 8] = [
    "ID",
    "Date",
    "Time",
    "Latitude",
    "Longitude",
    "Temperature (°C)",
    "Humidity (%)",
    "Discomfort Index",
];
