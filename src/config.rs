//! Widget settings with the documented defaults.
//!
//! [`Settings`] is deserialized with `#[serde(default)]`, so a partial options
//! object (TOML file or JSON) is merged over the defaults: fields the caller
//! supplies win, everything else falls back. Field names are camelCase to
//! match the option names used by pages embedding the widget.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SearchError};

/// Minimum term length before matches are rendered.
pub const DEFAULT_STRING_LENGTH: usize = 2;

/// Fallback shown when a search matches nothing.
pub const DEFAULT_NO_RESULTS: &str = "No results found!";

/// Freshness window requested on the page fetch: 24 hours.
pub const DEFAULT_CACHE_MAX_AGE: u64 = 86_400;

/// Configuration for one widget instance. Immutable once the widget is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Minimum number of characters before matches are rendered.
    pub string_length: usize,
    /// Extra pixels added to the deep-link scroll target.
    pub calc_scroll_top: f64,
    /// Whether a `title` query parameter triggers deep-link scrolling.
    pub scroll: bool,
    /// Fallback markup rendered when nothing matches. Inserted verbatim.
    pub no_results: String,
    /// URL or path of the page holding the searchable items. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// CSS selector for the searchable items inside `page`. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<String>,
    /// Forwarded to the result list as its `placeholder` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// `Cache-Control: max-age` sent with the page fetch, in seconds.
    pub cache_max_age: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            string_length: DEFAULT_STRING_LENGTH,
            calc_scroll_top: 0.0,
            scroll: true,
            no_results: DEFAULT_NO_RESULTS.to_owned(),
            page: None,
            elements: None,
            placeholder: None,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
        }
    }
}

impl Settings {
    /// The configured source page, if set and non-empty.
    pub fn page(&self) -> Option<&str> {
        self.page.as_deref().filter(|p| !p.is_empty())
    }

    /// The configured item selector, if set and non-empty.
    pub fn elements(&self) -> Option<&str> {
        self.elements.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// Checks that the required fields are present.
    ///
    /// `page` is checked before `elements`; the first problem found is
    /// returned as [`SearchError::Config`] carrying the diagnostic text.
    pub fn validate(&self) -> Result<()> {
        if self.page().is_none() {
            return Err(SearchError::Config("Path to the subpage is missing!".into()));
        }
        if self.elements().is_none() {
            return Err(SearchError::Config(
                "Element selector for the subpage is missing!".into(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON options object, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the JSON is malformed or a field has
    /// the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Load settings from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the settings cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SearchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
