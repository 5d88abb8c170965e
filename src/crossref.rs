//! Resolution of reference tokens against the header index.
//!
//! [`Resolver::replace_cross_refs`] turns body text into [`Segment`]s: literal text exactly as
//! written, and references carrying the heading number or heading text they point to. Renderers
//! decide whether a reference becomes plain text, a link, or both.

use crate::error::{Error, Result};
use crate::header_index::HeaderIndex;
use crate::row::field;
use crate::scanner::{self, Interior, RawToken, Span, TokenKind};
use crate::settings::Settings;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A reference that was found in the header index.
pub struct ParsedToken {
    /// Identifier of the referenced heading.
    pub id: i64,
    /// Kind symbol as written in the token.
    pub symbol: char,
    /// Column the symbol selects.
    pub kind: TokenKind,
    /// Substituted value; empty when the referenced row stops short of the column.
    pub value: String,
    /// Token text including delimiters.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
/// Piece of resolved text.
pub enum Segment {
    /// Text copied verbatim from the input.
    Literal(String),
    /// A resolved reference.
    Reference(ParsedToken),
}

impl Segment {
    #[must_use]
    /// Text this segment contributes under literal substitution.
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Reference(token) => &token.value,
        }
    }
}

#[must_use]
/// Concatenate segments, replacing each reference with its value.
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Resolves reference tokens against a borrowed header index.
pub struct Resolver<'a> {
    index: &'a HeaderIndex,
    settings: &'a Settings,
}

impl<'a> Resolver<'a> {
    #[must_use]
    /// Resolver reading from `index` with the delimiters and columns of `settings`.
    pub fn new(index: &'a HeaderIndex, settings: &'a Settings) -> Self {
        Self { index, settings }
    }

    /// Resolve a single token such as `{#7}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedToken`] if `token` is not exactly one reference,
    /// [`Error::IdOutOfRange`] if its identifier overflows `i64`, and [`Error::CrossRef`] if its
    /// identifier is not a heading.
    pub fn parse_token(&self, token: &str) -> Result<ParsedToken> {
        let malformed = || Error::MalformedToken {
            token: token.to_string(),
        };
        let interior = token
            .strip_prefix(self.settings.l_delim.as_str())
            .and_then(|rest| rest.strip_suffix(self.settings.r_delim.as_str()))
            .ok_or_else(malformed)?;
        match scanner::classify_interior(interior, self.settings) {
            Interior::Reference(kind, id) => self.resolve(RawToken {
                raw: token,
                kind,
                id,
            }),
            Interior::OutOfRange(_) => Err(out_of_range(token)),
            Interior::Text => Err(malformed()),
        }
    }

    /// Split `text` into literal and resolved segments, in text order.
    ///
    /// Bracketed spans that are not references stay in the literal text untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CrossRef`] or [`Error::IdOutOfRange`] for the first token whose
    /// identifier is not a heading. No segments are returned in that case.
    pub fn replace_cross_refs(&self, text: &str) -> Result<Vec<Segment>> {
        scanner::scan(text, self.settings)
            .into_iter()
            .map(|span| match span {
                Span::Literal(literal) => Ok(Segment::Literal(literal.to_string())),
                Span::Token(token) => self.resolve(token).map(Segment::Reference),
                Span::OutOfRange(raw) => Err(out_of_range(raw)),
            })
            .collect()
    }

    fn resolve(&self, token: RawToken<'_>) -> Result<ParsedToken> {
        let Some(row) = self.index.get(token.id) else {
            return Err(Error::CrossRef {
                id: token.id,
                token: token.raw.to_string(),
            });
        };
        let column = self.settings.column_of(token.kind);
        if column >= row.len() {
            tracing::debug!(
                id = token.id,
                column,
                "referenced row has no such column, substituting nothing"
            );
        }
        Ok(ParsedToken {
            id: token.id,
            symbol: self.settings.symbol_of(token.kind),
            kind: token.kind,
            value: field(row, column).to_string(),
            raw: token.raw.to_string(),
        })
    }
}

fn out_of_range(token: &str) -> Error {
    Error::IdOutOfRange {
        token: token.to_string(),
    }
}

/// Resolve every reference in `text` against `index`.
///
/// Shorthand for [`Resolver::replace_cross_refs`].
///
/// # Errors
///
/// Returns [`Error::CrossRef`] or [`Error::IdOutOfRange`] when a token's identifier is not a
/// heading.
pub fn replace_cross_refs(
    text: &str,
    index: &HeaderIndex,
    settings: &Settings,
) -> Result<Vec<Segment>> {
    Resolver::new(index, settings).replace_cross_refs(text)
}

#[cfg(test)]
#[path = "tests/crossref.rs"]
mod tests;
