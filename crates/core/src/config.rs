//! Configuration management for the Shopwise retrieval core.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (shopwise.yaml)
//!
//! Loaded settings are held in an explicit [`SettingsCache`] that callers
//! inject where needed and refresh on demand, instead of a process-global.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use crate::error::{AppError, AppResult};

/// Serving region for the search backend.
///
/// Only these three regions are valid; anything else is rejected at
/// validation time, before a network call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Global,
    Us,
    Eu,
}

impl Location {
    /// Canonical lowercase name, as it appears in resource paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Us => "us",
            Self::Eu => "eu",
        }
    }
}

impl FromStr for Location {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "global" => Ok(Self::Global),
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            _ => Err(AppError::Validation(
                "LOCATION must be one of: 'global', 'us', 'eu'".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// behavior across the gateway, router, and summarization adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cloud project identifier the datastores live in
    pub project_id: Option<String>,

    /// Serving region for the search backend
    pub location: Location,

    /// Datastore identifier for the item metadata index
    pub item_datastore_id: Option<String>,

    /// Datastore identifier for the review metadata index
    pub review_datastore_id: Option<String>,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider (e.g., "gemini", "ollama")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// API key for the generation provider
    pub api_key: Option<String>,

    /// Custom endpoint for the generation provider
    pub endpoint: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    search: Option<SearchSection>,
    llm: Option<LlmSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchSection {
    project: Option<String>,
    location: Option<String>,
    #[serde(rename = "itemDatastore")]
    item_datastore: Option<String>,
    #[serde(rename = "reviewDatastore")]
    review_datastore: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            location: Location::Global,
            item_datastore_id: None,
            review_datastore_id: None,
            config_file: None,
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            endpoint: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `GOOGLE_CLOUD_PROJECT`: Cloud project identifier
    /// - `GOOGLE_CLOUD_LOCATION`: Serving region (global, us, eu)
    /// - `ITEM_DATA_STORE_ID`: Item metadata datastore identifier
    /// - `REVIEW_DATA_STORE_ID`: Review metadata datastore identifier
    /// - `SHOPWISE_CONFIG`: Path to config file
    /// - `SHOPWISE_PROVIDER`: Generation provider
    /// - `SHOPWISE_MODEL`: Generation model identifier
    /// - `SHOPWISE_API_KEY`: API key for the generation provider
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("SHOPWISE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if one was named and exists
        if let Some(path) = config.config_file.clone() {
            if path.exists() {
                config.merge_yaml(&path)?;
            }
        }

        // Environment variables override YAML config
        if let Ok(project) = std::env::var("GOOGLE_CLOUD_PROJECT") {
            let project = project.trim().to_string();
            if !project.is_empty() {
                config.project_id = Some(project);
            }
        }

        if let Ok(location) = std::env::var("GOOGLE_CLOUD_LOCATION") {
            config.location = location.parse()?;
        }

        if let Ok(id) = std::env::var("ITEM_DATA_STORE_ID") {
            config.item_datastore_id = Some(id);
        }

        if let Ok(id) = std::env::var("REVIEW_DATA_STORE_ID") {
            config.review_datastore_id = Some(id);
        }

        if let Ok(provider) = std::env::var("SHOPWISE_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("SHOPWISE_MODEL") {
            config.model = model;
        }

        if let Ok(key) = std::env::var("SHOPWISE_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(cf) = config_file {
            self.config_file = Some(cf);
        }
        if let Some(p) = provider {
            self.provider = p;
        }
        if let Some(m) = model {
            self.model = m;
        }
        if let Some(level) = log_level {
            self.log_level = Some(level);
        }
        if verbose {
            self.verbose = true;
            self.log_level = Some("debug".to_string());
        }
        if no_color {
            self.no_color = true;
        }
        self
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(search) = config_file.search {
            if let Some(project) = search.project {
                self.project_id = Some(project);
            }
            if let Some(location) = search.location {
                self.location = location.parse()?;
            }
            if let Some(id) = search.item_datastore {
                self.item_datastore_id = Some(id);
            }
            if let Some(id) = search.review_datastore {
                self.review_datastore_id = Some(id);
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                self.provider = provider;
            }
            if let Some(model) = llm.model {
                self.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                self.endpoint = Some(endpoint);
            }
            if let Some(env_name) = llm.api_key_env {
                if let Ok(key) = std::env::var(&env_name) {
                    self.api_key = Some(key);
                }
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if logging.color == Some(false) {
                self.no_color = true;
            }
        }

        Ok(())
    }

    /// Project identifier, or a validation error when unset.
    pub fn require_project(&self) -> AppResult<&str> {
        self.project_id.as_deref().ok_or_else(|| {
            AppError::Validation(
                "Missing required environment variable: GOOGLE_CLOUD_PROJECT".to_string(),
            )
        })
    }
}

/// Explicit cache of loaded settings.
///
/// Holds the effective [`AppConfig`] behind a read-write lock so the
/// gateway and adapters can share one handle; `refresh()` re-reads the
/// environment and config file without restarting the process.
#[derive(Debug)]
pub struct SettingsCache {
    inner: RwLock<AppConfig>,
}

impl SettingsCache {
    /// Wrap an already-loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Load configuration from the environment and wrap it.
    pub fn load() -> AppResult<Self> {
        Ok(Self::new(AppConfig::load()?))
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> AppConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-read configuration from the environment, replacing the cached
    /// snapshot.
    pub fn refresh(&self) -> AppResult<()> {
        let fresh = AppConfig::load()?;
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parsing() {
        assert_eq!("global".parse::<Location>().unwrap(), Location::Global);
        assert_eq!("us".parse::<Location>().unwrap(), Location::Us);
        assert_eq!("EU".parse::<Location>().unwrap(), Location::Eu);
        // Empty falls back to the default region
        assert_eq!("".parse::<Location>().unwrap(), Location::Global);
        assert!("asia".parse::<Location>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.location, Location::Global);
        assert_eq!(config.provider, "gemini");
        assert!(config.project_id.is_none());
    }

    #[test]
    fn test_require_project_missing() {
        let config = AppConfig::default();
        match config.require_project() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("GOOGLE_CLOUD_PROJECT"))
            }
            other => panic!("Expected validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(
            None,
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_settings_cache_snapshot() {
        let mut config = AppConfig::default();
        config.project_id = Some("demo-project".to_string());

        let cache = SettingsCache::new(config);
        assert_eq!(cache.current().project_id.as_deref(), Some("demo-project"));
    }
}
