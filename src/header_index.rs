//! Lookup from heading identifiers to their rows.
//!
//! The index is built once per document from the full row set and offers no way to mutate it
//! afterwards, so resolution only ever needs shared borrows.

use crate::row::{field, row_id, Row};
use crate::settings::Settings;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Heading rows keyed by their integer identifier, in ascending identifier order.
pub struct HeaderIndex {
    rows: BTreeMap<i64, Row>,
}

impl HeaderIndex {
    #[must_use]
    /// Row registered under `id`.
    pub fn get(&self, id: i64) -> Option<&Row> {
        self.rows.get(&id)
    }

    #[must_use]
    /// Whether a heading with this identifier exists.
    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    #[must_use]
    /// Number of indexed headings.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    /// True when no heading was found.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indexed identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.keys().copied()
    }

    /// Identifier and row pairs in ascending identifier order.
    pub fn entries(&self) -> impl Iterator<Item = (i64, &Row)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }
}

#[must_use]
/// Whether the row carries a heading number or heading text.
///
/// Any non-empty field counts, whitespace included.
pub fn is_heading_row(row: &[String], settings: &Settings) -> bool {
    !field(row, settings.heading_number_column).is_empty()
        || !field(row, settings.heading_text_column).is_empty()
}

#[must_use]
/// Build the header index from every row of the outline.
///
/// Rows without a numeric identifier are body-only and skipped. When two heading rows share an
/// identifier the later one wins.
pub fn build_header_dict(rows: &[Row], settings: &Settings) -> HeaderIndex {
    let mut index = BTreeMap::new();
    for row in rows {
        let Some(id) = row_id(row) else {
            continue;
        };
        if !is_heading_row(row, settings) {
            continue;
        }
        if index.insert(id, row.clone()).is_some() {
            tracing::warn!(id, "duplicate heading identifier, keeping the later row");
        }
    }
    tracing::debug!(headings = index.len(), "built header index");
    HeaderIndex { rows: index }
}

#[cfg(test)]
#[path = "tests/header_index.rs"]
mod tests;
