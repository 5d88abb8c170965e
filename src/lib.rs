//! csvdoc: cross-referenced documents from CSV outlines.
//!
//! Each CSV row is a heading, body text, or both. Body text may point at headings with reference
//! tokens such as `{#7}` (heading number of row 7) or `{H7}` (its heading text). The core of the
//! crate builds a [`HeaderIndex`] from the rows and resolves tokens into [`Segment`]s; the
//! remaining modules read CSV and settings files and render the result.
//!
//! ```
//! use csvdoc::{build_header_dict, join_segments, replace_cross_refs, Settings};
//!
//! let settings = Settings::default();
//! let rows = vec![
//!     vec!["7".into(), String::new(), "2".into(), "1.1".into(), "Scope".into(), String::new()],
//! ];
//! let index = build_header_dict(&rows, &settings);
//! let segments = replace_cross_refs("See {#7} ({H7}).", &index, &settings).unwrap();
//! assert_eq!(join_segments(&segments), "See 1.1 (Scope).");
//! ```

pub mod config;
pub mod crossref;
pub mod error;
pub mod header_index;
pub mod input;
pub mod render;
pub mod row;
pub mod scanner;
pub mod settings;

pub use crossref::{join_segments, replace_cross_refs, ParsedToken, Resolver, Segment};
pub use error::{Error, Result};
pub use header_index::{build_header_dict, HeaderIndex};
pub use row::{clean_backslash_r, Row};
pub use scanner::TokenKind;
pub use settings::Settings;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
