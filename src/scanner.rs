//! Delimiter scanning for reference tokens.
//!
//! A reference has the shape `L kind ID R`, for example `{#7}` or `{H7}` with the default
//! settings. The scanner walks the text once, left to right, and pairs each opening delimiter
//! with the next closing one. A bracketed span whose interior is not a kind symbol followed by
//! an integer stays literal text, delimiters included. An integer too large for any heading
//! identifier still makes a token, so it cannot slip through as text.

use crate::settings::Settings;
use serde::Serialize;
use std::num::IntErrorKind;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Which column of the referenced heading a token substitutes.
pub enum TokenKind {
    /// The heading number, e.g. `1.1`.
    HeadingNumber,
    /// The heading text, e.g. `Introduction`.
    HeadingText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A delimited span of the input, before its interior is interpreted.
pub struct Bracketed {
    /// Byte range of the whole span, delimiters included.
    pub span: Range<usize>,
    /// Byte range between the delimiters.
    pub interior: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A token recognised by the scanner, not yet looked up.
pub struct RawToken<'a> {
    /// Token text including delimiters.
    pub raw: &'a str,
    /// Requested column.
    pub kind: TokenKind,
    /// Referenced heading identifier.
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Piece of scanned text.
pub enum Span<'a> {
    /// Verbatim text, including bracketed spans that are not references.
    Literal(&'a str),
    /// A syntactically valid reference.
    Token(RawToken<'a>),
    /// A reference whose identifier overflows `i64`, as written including delimiters.
    OutOfRange(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a span interior reads.
pub enum Interior {
    /// Kind symbol followed by an identifier.
    Reference(TokenKind, i64),
    /// Kind symbol followed by an integer outside the `i64` range.
    OutOfRange(TokenKind),
    /// Anything else.
    Text,
}

#[must_use]
/// Find every non-overlapping `l_delim ... r_delim` span, left to right.
///
/// Interiors never contain the opening delimiter: in `{a {#7}` the first `{` is plain text and
/// the span is `{#7}`. An opening delimiter without a closing one is plain text.
pub fn bracketed(text: &str, l_delim: &str, r_delim: &str) -> Vec<Bracketed> {
    let mut spans = Vec::new();
    if l_delim.is_empty() || r_delim.is_empty() {
        return spans;
    }

    let mut pos = 0;
    while let Some(offset) = text[pos..].find(l_delim) {
        let mut open = pos + offset;
        let mut inner = open + l_delim.len();
        let Some(close_offset) = text[inner..].find(r_delim) else {
            break;
        };
        let close = inner + close_offset;
        if let Some(reopen) = text[inner..close].rfind(l_delim) {
            open = inner + reopen;
            inner = open + l_delim.len();
        }
        let end = close + r_delim.len();
        spans.push(Bracketed {
            span: open..end,
            interior: inner..close,
        });
        pos = end;
    }
    spans
}

#[must_use]
/// Classify a span interior as a reference, an out-of-range reference, or plain text.
pub fn classify_interior(interior: &str, settings: &Settings) -> Interior {
    let mut chars = interior.chars();
    let Some(kind) = chars.next().and_then(|symbol| settings.kind_of(symbol)) else {
        return Interior::Text;
    };
    match chars.as_str().parse::<i64>() {
        Ok(id) => Interior::Reference(kind, id),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Interior::OutOfRange(kind)
        }
        Err(_) => Interior::Text,
    }
}

#[must_use]
/// Interpret a span interior as `kind ID`.
pub fn parse_interior(interior: &str, settings: &Settings) -> Option<(TokenKind, i64)> {
    match classify_interior(interior, settings) {
        Interior::Reference(kind, id) => Some((kind, id)),
        Interior::OutOfRange(_) | Interior::Text => None,
    }
}

#[must_use]
/// Split `text` into literal runs and reference tokens, in order.
///
/// Concatenating the spans (tokens by their raw text) gives back `text` unchanged. Adjacent
/// literal text is always merged into a single span.
pub fn scan<'a>(text: &'a str, settings: &Settings) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut literal_start = 0;

    for candidate in bracketed(text, &settings.l_delim, &settings.r_delim) {
        let raw = &text[candidate.span.clone()];
        let span = match classify_interior(&text[candidate.interior], settings) {
            Interior::Reference(kind, id) => Span::Token(RawToken { raw, kind, id }),
            Interior::OutOfRange(_) => Span::OutOfRange(raw),
            Interior::Text => continue,
        };
        if literal_start < candidate.span.start {
            spans.push(Span::Literal(&text[literal_start..candidate.span.start]));
        }
        spans.push(span);
        literal_start = candidate.span.end;
    }

    if literal_start < text.len() {
        spans.push(Span::Literal(&text[literal_start..]));
    }
    spans
}

#[cfg(test)]
#[path = "tests/scanner.rs"]
mod tests;
