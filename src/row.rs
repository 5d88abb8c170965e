//! Rows of the CSV outline and the carriage-return cleanup applied before indexing.

use crate::error::Result;
use crate::settings::Settings;

/// Positional fields of one outline line; field 0 is the row identifier.
pub type Row = Vec<String>;

#[must_use]
/// Field at `index`, or the empty string when the row is too short.
pub fn field(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

#[must_use]
/// Integer identifier held in field 0, if it parses.
pub fn row_id(row: &[String]) -> Option<i64> {
    row.first()?.trim().parse().ok()
}

/// Replace carriage returns in the fields listed by `indices_to_replace_backslash_r`.
///
/// Rows come back unchanged when no index is configured. Otherwise only the listed fields are
/// rewritten, with every `\r` replaced by `replace_backslash_r_with`.
///
/// # Errors
///
/// Returns [`crate::Error::Configuration`] when the replacement string is missing or an index is
/// not an integer within `[-row.len(), row.len())`.
pub fn clean_backslash_r(row: &[String], settings: &Settings) -> Result<Row> {
    let Some(plan) = settings.backslash_r_plan(row.len())? else {
        return Ok(row.to_vec());
    };

    let mut cleaned = row.to_vec();
    for position in plan.positions {
        let value = &mut cleaned[position];
        if value.contains('\r') {
            *value = value.replace('\r', plan.replacement);
        }
    }
    Ok(cleaned)
}

#[cfg(test)]
#[path = "tests/row.rs"]
mod tests;
