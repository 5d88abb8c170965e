//! CSV reading for outline files.
//!
//! The first record is the column header line and is dropped. Rows may differ in width, since
//! trailing empty cells are often left out by spreadsheet exports; rows shorter than the header
//! are padded with empty fields to the header width before cleaning.

use crate::error::Result;
use crate::row::{clean_backslash_r, Row};
use crate::settings::Settings;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Read all rows of the outline at `path`, cleaned per `settings`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the CSV is malformed, or the carriage-return
/// settings are invalid for a row.
pub fn read_rows(path: &Path, settings: &Settings) -> Result<Vec<Row>> {
    let file = File::open(path)?;
    let rows = rows_from_reader(BufReader::new(file), settings)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "read outline");
    Ok(rows)
}

/// Read all rows from any CSV source, cleaned per `settings`.
///
/// Short rows are padded to the header width, so carriage-return indices valid for the header
/// are valid for every row.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or the carriage-return settings are invalid.
pub fn rows_from_reader<R: io::Read>(reader: R, settings: &Settings) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let width = csv_reader.headers()?.len();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut row: Row = record.iter().map(ToString::to_string).collect();
        if row.len() < width {
            row.resize(width, String::new());
        }
        rows.push(clean_backslash_r(&row, settings)?);
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
