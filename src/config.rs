//! Application configuration.
//!
//! Values are resolved with priority `config.toml` > environment (`.env`) >
//! built-in defaults. Fixed constants that are not user-configurable live at
//! the bottom of this module.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api: Option<ApiSection>,
    search: Option<SearchSection>,
}

#[derive(Debug, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchSection {
    debounce_ms: Option<u64>,
    min_chars: Option<usize>,
}

// ==================== Resolved Configuration ====================

/// Default API base URL when neither config.toml nor API_BASE_URL set one
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in milliseconds
pub const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;

/// Default debounce delay for search inputs
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default minimum number of characters before a search is issued
pub const DEFAULT_MIN_SEARCH_CHARS: usize = 2;

/// Settings for the REST client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
        }
    }
}

/// Settings for debounced search inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub min_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_chars: DEFAULT_MIN_SEARCH_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration with priority: config file > .env / environment > default
    pub fn load_from(path: &Path) -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
                    FileConfig::default()
                }
            },
            Err(_) => FileConfig::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML text, consulting `env` for values the text leaves unset.
    pub fn from_toml_str(
        contents: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, toml::de::Error> {
        let file = toml::from_str::<FileConfig>(contents)?;
        Ok(Self::resolve(file, env))
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        let api = file.api.unwrap_or(ApiSection {
            base_url: None,
            timeout_ms: None,
        });

        // Priority 1: config.toml
        if let Some(url) = api.base_url {
            tracing::info!("Using API base URL from config.toml: {}", url);
            config.api.base_url = url;
        // Priority 2: API_BASE_URL
        } else if let Some(url) = env("API_BASE_URL") {
            tracing::info!("Using API base URL from API_BASE_URL env: {}", url);
            config.api.base_url = url;
        } else {
            tracing::debug!("Using default API base URL: {}", config.api.base_url);
        }

        let timeout_ms = api.timeout_ms.or_else(|| {
            env("API_TIMEOUT").and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(_) => {
                    tracing::warn!("API_TIMEOUT is not a number of milliseconds: {}", raw);
                    None
                }
            })
        });
        if let Some(ms) = timeout_ms.filter(|ms| *ms > 0) {
            config.api.timeout = Duration::from_millis(ms);
        }

        if let Some(search) = file.search {
            if let Some(ms) = search.debounce_ms {
                config.search.debounce = Duration::from_millis(ms);
            }
            if let Some(min) = search.min_chars {
                config.search.min_chars = min;
            }
        }

        config
    }
}

// ==================== Review Scheduling ====================

/// Review interval shown to the user after an "easy" rating
pub const EASY_INTERVAL_DAYS: u32 = 7;

/// Review interval shown to the user after a "medium" rating
pub const MEDIUM_INTERVAL_DAYS: u32 = 3;

/// Review interval shown to the user after a "hard" rating
pub const HARD_INTERVAL_DAYS: u32 = 1;

// ==================== Validation ====================

/// Minimum password length accepted by login and register forms
pub const MIN_PASSWORD_LENGTH: usize = 6;
