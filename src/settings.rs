//! Settings that steer row cleaning and reference resolution.
//!
//! Settings are read from a JSON file (by default `csvdoc.json`, see [`crate::config`]). Every
//! key is optional: absent keys fall back to the defaults of the sample outline layout, and the
//! two backslash-r keys stay absent unless given. [`Settings::validate`] runs on load so that a
//! bad delimiter or symbol is reported before any row is touched.

use crate::error::{Error, Result};
use crate::scanner::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// One entry of `indices_to_replace_backslash_r` as written in the settings file.
///
/// Anything that is not an integer is kept so that validation can name it.
pub enum FieldIndex {
    /// Positional index, negative values counting back from the end of the row.
    Position(i64),
    /// A non-integer entry, always rejected by validation.
    Invalid(serde_json::Value),
}

impl fmt::Display for FieldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(index) => write!(f, "{index}"),
            Self::Invalid(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for FieldIndex {
    fn from(index: i64) -> Self {
        Self::Position(index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Delimiters, kind symbols and column layout shared by every component.
pub struct Settings {
    /// Opening delimiter of a reference token.
    pub l_delim: String,
    /// Closing delimiter of a reference token.
    pub r_delim: String,
    /// Kind symbol substituting the referenced heading number.
    pub heading_number_symbol: char,
    /// Kind symbol substituting the referenced heading text.
    pub heading_text_symbol: char,
    /// Column holding the heading level.
    pub heading_level_column: usize,
    /// Column holding the heading number, read by heading-number references.
    pub heading_number_column: usize,
    /// Column holding the heading text, read by heading-text references.
    pub heading_text_column: usize,
    /// Column holding free body text.
    pub body_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Fields whose carriage returns get replaced.
    pub indices_to_replace_backslash_r: Option<Vec<FieldIndex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Replacement for carriage returns, required once any index is listed.
    pub replace_backslash_r_with: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            l_delim: "{".to_string(),
            r_delim: "}".to_string(),
            heading_number_symbol: '#',
            heading_text_symbol: 'H',
            heading_level_column: 2,
            heading_number_column: 3,
            heading_text_column: 4,
            body_column: 5,
            indices_to_replace_backslash_r: None,
            replace_backslash_r_with: None,
        }
    }
}

/// Validated carriage-return replacement for a row of known width.
#[derive(Debug, PartialEq, Eq)]
pub struct BackslashRPlan<'a> {
    /// Non-negative field positions to clean.
    pub positions: Vec<usize>,
    /// Text substituted for each `\r`.
    pub replacement: &'a str,
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for invalid JSON and [`Error::Configuration`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as [`Settings::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading settings");
        Self::from_json_str(&contents)
    }

    /// Check delimiters and kind symbols for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.l_delim.is_empty() {
            return Err(Error::configuration("l_delim must not be empty"));
        }
        if self.r_delim.is_empty() {
            return Err(Error::configuration("r_delim must not be empty"));
        }
        if self.heading_number_symbol == self.heading_text_symbol {
            return Err(Error::configuration(format!(
                "heading_number_symbol and heading_text_symbol are both {:?}",
                self.heading_number_symbol
            )));
        }
        for (name, symbol) in [
            ("heading_number_symbol", self.heading_number_symbol),
            ("heading_text_symbol", self.heading_text_symbol),
        ] {
            if self.l_delim.contains(symbol) || self.r_delim.contains(symbol) {
                return Err(Error::configuration(format!(
                    "{name} {symbol:?} collides with a delimiter"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    /// Map a kind symbol to the reference kind it selects.
    pub fn kind_of(&self, symbol: char) -> Option<TokenKind> {
        if symbol == self.heading_number_symbol {
            Some(TokenKind::HeadingNumber)
        } else if symbol == self.heading_text_symbol {
            Some(TokenKind::HeadingText)
        } else {
            None
        }
    }

    #[must_use]
    /// Symbol written in tokens of the given kind.
    pub fn symbol_of(&self, kind: TokenKind) -> char {
        match kind {
            TokenKind::HeadingNumber => self.heading_number_symbol,
            TokenKind::HeadingText => self.heading_text_symbol,
        }
    }

    #[must_use]
    /// Column a reference of the given kind substitutes from.
    pub fn column_of(&self, kind: TokenKind) -> usize {
        match kind {
            TokenKind::HeadingNumber => self.heading_number_column,
            TokenKind::HeadingText => self.heading_text_column,
        }
    }

    /// Validate the carriage-return settings against a row of `row_len` fields.
    ///
    /// Returns `Ok(None)` when no index is configured, in which case rows pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when indices are listed without a replacement string, or
    /// when any entry is not an integer within `[-row_len, row_len)`. The message lists every
    /// offending entry.
    pub fn backslash_r_plan(&self, row_len: usize) -> Result<Option<BackslashRPlan<'_>>> {
        let indices = match self.indices_to_replace_backslash_r.as_deref() {
            None | Some([]) => return Ok(None),
            Some(indices) => indices,
        };
        let Some(replacement) = self.replace_backslash_r_with.as_deref() else {
            return Err(Error::configuration(
                "indices_to_replace_backslash_r is set but replace_backslash_r_with is missing",
            ));
        };

        let mut positions = Vec::with_capacity(indices.len());
        let mut offenders = Vec::new();
        for entry in indices {
            match entry {
                FieldIndex::Position(index) => match resolve_position(*index, row_len) {
                    Some(position) => positions.push(position),
                    None => offenders.push(entry.to_string()),
                },
                FieldIndex::Invalid(_) => offenders.push(entry.to_string()),
            }
        }

        if offenders.is_empty() {
            Ok(Some(BackslashRPlan {
                positions,
                replacement,
            }))
        } else {
            Err(Error::configuration(format!(
                "indices_to_replace_backslash_r has invalid entries for a row of {row_len} fields: {}",
                offenders.join(", ")
            )))
        }
    }
}

fn resolve_position(index: i64, row_len: usize) -> Option<usize> {
    let len = i64::try_from(row_len).ok()?;
    let position = if index < 0 { len + index } else { index };
    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/settings.rs"]
mod tests;
