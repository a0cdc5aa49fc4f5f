//! Configuration management: runtime settings and scraper definitions.

pub mod builtin;
pub mod scraper;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use self::scraper::ScraperConfig;

/// Default HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default delay between bulk-crawl requests in milliseconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Delay between requests during bulk crawls, in milliseconds.
    pub request_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: "artscrape/0.3 (content import)".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
        }
    }
}

/// Configuration file structure (TOML).
///
/// Everything is optional; `[scrapers.<kind>]` tables replace the
/// built-in definition for that kind, which lets operators tune
/// selectors without a rebuild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub scrapers: HashMap<String, ScraperConfig>,

    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub async fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply file values to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(delay) = self.request_delay_ms {
            settings.request_delay_ms = delay;
        }
    }

    /// Resolve the scraper config for a kind parameter: file-defined
    /// entries take precedence over built-ins.
    pub fn scraper(&self, kind: &str) -> Option<ScraperConfig> {
        self.scrapers
            .get(kind)
            .cloned()
            .or_else(|| builtin::builtin_configs().remove(kind))
    }

    /// All known kind parameters, built-in and file-defined.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = builtin::builtin_configs()
            .into_keys()
            .chain(self.scrapers.keys().cloned())
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}
