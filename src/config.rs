//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a csvdoc.toml, and if present we load preferences from there.
//! This provides the default settings file, image file extensions and the anchor prefix used
//! when rendering links.

use facet::Facet;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "csvdoc.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from csvdoc.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "csvdoc.json".to_string())]
    /// JSON settings file used when none is given on the command line.
    pub settings_file: String,
    #[facet(default = default_image_extensions())]
    /// Suffixes marking a bracketed span as an image reference.
    pub image_extensions: Vec<String>,
    #[facet(default = "h".to_string())]
    /// Prefix for heading anchors, so heading 7 gets the anchor `h7`.
    pub anchor_prefix: String,
}

fn default_image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif", "svg", "bmp"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_file: "csvdoc.json".to_string(),
            image_extensions: default_image_extensions(),
            anchor_prefix: "h".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load preferences from csvdoc.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load preferences from `path`, using defaults if it is missing or does not parse.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
            return config;
        }
        tracing::warn!(path = %path.display(), "ignoring unparseable preferences");
        Self::default()
    }

    #[must_use]
    /// Whether `path` ends in one of the configured image extensions, ignoring case.
    pub fn is_image_path(&self, path: &str) -> bool {
        Path::new(path.trim())
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.image_extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
