//! Configuration for a paged source run
//!
//! Two pieces, both read once at start and never mutated:
//!
//! - [`SourceConfig`] - the source's own settings (`url`, `limit_pages`),
//!   loaded from YAML or JSON
//! - [`RunOptions`] - host-provided switches (partial mode, item limit),
//!   commonly taken from the environment

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// Environment variable enabling partial mode
pub const PARTIAL_ENV: &str = "PAGED_SOURCE_PARTIAL";

/// Environment variable carrying the item-count limit
pub const MAX_ITEMS_ENV: &str = "PAGED_SOURCE_MAX_ITEMS";

// ============================================================================
// Source Config
// ============================================================================

/// Source settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base listing endpoint
    #[serde(default)]
    pub url: Option<String>,

    /// Cap on the number of pages fetched
    #[serde(default)]
    pub limit_pages: Option<u64>,
}

impl SourceConfig {
    /// Create a config for the given endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            limit_pages: None,
        }
    }

    /// Set the page cap
    #[must_use]
    pub fn with_limit_pages(mut self, pages: u64) -> Self {
        self.limit_pages = Some(pages);
        self
    }

    /// Load from a YAML (or JSON) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string. JSON is valid YAML, so this covers both.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validated base URL.
    ///
    /// A missing or blank `url` is fatal and must be reported before any
    /// iteration starts.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::missing_field("url"))?;
        Ok(Url::parse(raw)?)
    }

    /// Effective page cap; zero means no cap
    pub fn page_cap(&self) -> Option<u64> {
        self.limit_pages.filter(|&p| p > 0)
    }
}

// ============================================================================
// Run Options
// ============================================================================

/// Host-provided run switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Partial migration mode: stop once enough unchanged rows were seen
    pub partial: bool,
    /// Stop after this many records
    pub max_items: Option<usize>,
}

impl RunOptions {
    /// Create default options (full mode, no limit)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable partial mode
    #[must_use]
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Set the item limit
    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Read options from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read options through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let partial = lookup(PARTIAL_ENV).is_some_and(|v| is_truthy(&v));
        let max_items = lookup(MAX_ITEMS_ENV).and_then(|v| v.trim().parse::<usize>().ok());
        Self { partial, max_items }
    }

    /// Item limit if one is set and greater than zero
    pub fn item_limit(&self) -> Option<usize> {
        self.max_items.filter(|&n| n > 0)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_source_config_from_yaml() {
        let config = SourceConfig::from_yaml(
            "url: https://api.example.com/v1/entries/?format=json\nlimit_pages: 3\n",
        )
        .unwrap();
        assert_eq!(
            config.url.as_deref(),
            Some("https://api.example.com/v1/entries/?format=json")
        );
        assert_eq!(config.page_cap(), Some(3));
    }

    #[test]
    fn test_source_config_from_json() {
        let config = SourceConfig::from_json(r#"{"url": "http://localhost/api"}"#).unwrap();
        assert_eq!(config.url.as_deref(), Some("http://localhost/api"));
        assert_eq!(config.page_cap(), None);
    }

    #[test]
    fn test_source_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://localhost/api\nlimit_pages: 0").unwrap();

        let config = SourceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.limit_pages, Some(0));
        assert_eq!(config.page_cap(), None);
    }

    #[test]
    fn test_source_config_missing_file() {
        let err = SourceConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_base_url_missing() {
        let err = SourceConfig::default().base_url().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "url"));

        let err = SourceConfig::new("   ").base_url().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_base_url_invalid() {
        let err = SourceConfig::new("not a url").base_url().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_run_options_from_lookup() {
        let env: HashMap<&str, &str> =
            HashMap::from([(PARTIAL_ENV, "true"), (MAX_ITEMS_ENV, "25")]);
        let options = RunOptions::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert!(options.partial);
        assert_eq!(options.item_limit(), Some(25));
    }

    #[test]
    fn test_run_options_lookup_defaults() {
        let options = RunOptions::from_lookup(|_| None);
        assert_eq!(options, RunOptions::default());

        let env: HashMap<&str, &str> =
            HashMap::from([(PARTIAL_ENV, "no"), (MAX_ITEMS_ENV, "lots")]);
        let options = RunOptions::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert!(!options.partial);
        assert_eq!(options.max_items, None);
    }

    #[test]
    fn test_zero_item_limit_means_unlimited() {
        let options = RunOptions::new().with_max_items(0);
        assert_eq!(options.item_limit(), None);
    }
}
