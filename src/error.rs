//! Error types shared by the resolution core and its adapters.

use thiserror::Error;

/// Errors raised while cleaning rows, resolving references or loading inputs.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings are malformed or incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Names the offending setting or index.
        message: String,
    },

    /// A reference token points at an identifier missing from the header index.
    #[error("unresolved cross-reference {token}: no heading with id {id}")]
    CrossRef {
        /// Identifier that could not be found.
        id: i64,
        /// Token text as written in the source.
        token: String,
    },

    /// A reference token's identifier does not fit a heading identifier, so no heading matches.
    #[error("unresolved cross-reference {token}: id out of range")]
    IdOutOfRange {
        /// Token text as written in the source.
        token: String,
    },

    /// Text handed to the token parser does not have the shape of a reference.
    #[error("malformed reference token: {token:?}")]
    MalformedToken {
        /// Offending text.
        token: String,
    },

    /// CSV input could not be read.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Settings JSON could not be parsed or output could not be serialised.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading inputs or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Result type for csvdoc operations.
pub type Result<T> = std::result::Result<T, Error>;
