//! Assembly of resolved outline rows into a document, and its text renderings.
//!
//! Heading rows become headings, body text becomes paragraphs of resolved segments, and a body
//! that is nothing but a bracketed image path becomes an image block. Markdown output links each
//! reference to an anchor placed above its heading.

use crate::config::Config;
use crate::crossref::{join_segments, Resolver, Segment};
use crate::error::Result;
use crate::header_index::{build_header_dict, is_heading_row};
use crate::row::{field, row_id, Row};
use crate::scanner::bracketed;
use crate::settings::Settings;
use serde::Serialize;
use std::fmt::Write;

const MAX_HEADING_LEVEL: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Block-level element of the output document.
pub enum Block {
    /// Section heading.
    Heading {
        /// Row identifier, used as anchor target; absent for rows without a numeric id.
        id: Option<i64>,
        /// Nesting depth, 1 to 6.
        level: u8,
        /// Heading number such as `1.1`.
        number: String,
        /// Heading text.
        text: String,
    },
    /// Body text with references resolved.
    Paragraph {
        /// Literal and reference segments in text order.
        segments: Vec<Segment>,
    },
    /// Standalone image reference.
    Image {
        /// Image path as written between the delimiters.
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outline rows resolved into document blocks.
pub struct Document {
    /// Blocks in row order.
    pub blocks: Vec<Block>,
    #[serde(skip)]
    l_delim: String,
    #[serde(skip)]
    r_delim: String,
    #[serde(skip)]
    config: Config,
}

impl Document {
    /// Build the document from outline rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CrossRef`] if any body text references a missing heading.
    pub fn build(rows: &[Row], settings: &Settings, config: &Config) -> Result<Self> {
        let index = build_header_dict(rows, settings);
        if index.len() <= 1 {
            tracing::warn!(
                headings = index.len(),
                "outline has at most one heading, check the column settings"
            );
        }
        let resolver = Resolver::new(&index, settings);

        let mut blocks = Vec::new();
        for row in rows {
            if is_heading_row(row, settings) {
                blocks.push(Block::Heading {
                    id: row_id(row),
                    level: heading_level(field(row, settings.heading_level_column)),
                    number: field(row, settings.heading_number_column).trim().to_string(),
                    text: field(row, settings.heading_text_column).trim().to_string(),
                });
            }

            let body = field(row, settings.body_column);
            if body.trim().is_empty() {
                continue;
            }
            if let Some(path) = standalone_image(body, settings, config) {
                blocks.push(Block::Image { path });
                continue;
            }
            let segments = resolver.replace_cross_refs(body).inspect_err(|e| {
                tracing::error!(row = ?row_id(row), error = %e, "cannot resolve body text");
            })?;
            blocks.push(Block::Paragraph { segments });
        }

        Ok(Self {
            blocks,
            l_delim: settings.l_delim.clone(),
            r_delim: settings.r_delim.clone(),
            config: config.clone(),
        })
    }

    #[must_use]
    /// Render as Markdown with heading anchors, reference links and inline images.
    ///
    /// A reference with an empty value is linked by its token text instead.
    pub fn to_markdown(&self) -> String {
        let rendered: Vec<String> = self
            .blocks
            .iter()
            .map(|block| self.markdown_block(block))
            .collect();
        finish(&rendered)
    }

    #[must_use]
    /// Render as plain text, with references replaced by their values.
    pub fn to_plain_text(&self) -> String {
        let rendered: Vec<String> = self
            .blocks
            .iter()
            .map(|block| match block {
                Block::Heading { number, text, .. } => heading_label(number, text),
                Block::Paragraph { segments } => join_segments(segments),
                Block::Image { path } => path.clone(),
            })
            .collect();
        finish(&rendered)
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn markdown_block(&self, block: &Block) -> String {
        let prefix = &self.config.anchor_prefix;
        let mut out = String::new();
        match block {
            Block::Heading {
                id,
                level,
                number,
                text,
            } => {
                if let Some(id) = id {
                    writeln!(out, "<a id=\"{prefix}{id}\"></a>").unwrap();
                }
                write!(
                    out,
                    "{} {}",
                    "#".repeat(usize::from(*level)),
                    heading_label(number, text)
                )
                .unwrap();
            }
            Block::Paragraph { segments } => {
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => out.push_str(&self.inline_images(text)),
                        Segment::Reference(token) => {
                            let label = if token.value.is_empty() {
                                &token.raw
                            } else {
                                &token.value
                            };
                            write!(out, "[{label}](#{prefix}{})", token.id).unwrap();
                        }
                    }
                }
            }
            Block::Image { path } => write!(out, "![]({path})").unwrap(),
        }
        out
    }

    fn inline_images(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for candidate in bracketed(text, &self.l_delim, &self.r_delim) {
            let path = &text[candidate.interior];
            if self.config.is_image_path(path) {
                out.push_str(&text[last..candidate.span.start]);
                write!(out, "![]({})", path.trim()).unwrap();
                last = candidate.span.end;
            }
        }
        out.push_str(&text[last..]);
        out
    }
}

fn heading_level(raw: &str) -> u8 {
    raw.trim()
        .parse::<u8>()
        .unwrap_or(1)
        .clamp(1, MAX_HEADING_LEVEL)
}

fn heading_label(number: &str, text: &str) -> String {
    [number, text]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn standalone_image(body: &str, settings: &Settings, config: &Config) -> Option<String> {
    let body = body.trim();
    let spans = bracketed(body, &settings.l_delim, &settings.r_delim);
    let [only] = spans.as_slice() else {
        return None;
    };
    if only.span != (0..body.len()) {
        return None;
    }
    let path = body[only.interior.clone()].trim();
    config.is_image_path(path).then(|| path.to_string())
}

fn finish(blocks: &[String]) -> String {
    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
