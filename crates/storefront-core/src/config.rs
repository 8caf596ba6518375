//! Storefront configuration.
//!
//! Values come from a TOML (or JSON) file and are then overridden by
//! environment variables, so deployments can inject endpoints and keys
//! without touching the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config {path}: {message}")]
    Toml { path: String, message: String },

    #[error("Failed to parse JSON config {path}: {message}")]
    Json { path: String, message: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Invalid config value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Full storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Hosted search index.
    #[serde(default)]
    pub search: SearchServiceConfig,

    /// Commerce backend REST API.
    #[serde(default)]
    pub backend: CommerceBackendConfig,
}

/// Search service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchServiceConfig {
    /// Base URL of the search service.
    #[serde(default = "default_search_host")]
    pub host: String,

    /// API key sent as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Index holding product documents.
    #[serde(default = "default_index")]
    pub index: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_search_host() -> String {
    "http://127.0.0.1:7700".to_string()
}

fn default_index() -> String {
    "products".to_string()
}

fn default_search_timeout_ms() -> u64 {
    500
}

impl Default for SearchServiceConfig {
    fn default() -> Self {
        Self {
            host: default_search_host(),
            api_key: None,
            index: default_index(),
            timeout_ms: default_search_timeout_ms(),
        }
    }
}

/// Commerce backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceBackendConfig {
    /// Base URL of the backend (without the `/store` prefix).
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_backend_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_backend_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_backend_timeout_ms() -> u64 {
    1000
}

impl Default for CommerceBackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_ms: default_backend_timeout_ms(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Json {
                path: display,
                message: e.to_string(),
            })
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Toml {
                path: display,
                message: e.to_string(),
            })
        }
    }

    /// Find a config file in `start` or any of its ancestors.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Plain names win over their `NEXT_PUBLIC_` prefixed variants.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .or_else(|| lookup(&format!("NEXT_PUBLIC_{}", name)))
                .filter(|v| !v.trim().is_empty())
        };

        if let Some(host) = read("MEILISEARCH_HOST") {
            self.search.host = host;
        }
        if let Some(key) = read("MEILISEARCH_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(index) = read("MEILISEARCH_INDEX") {
            self.search.index = index;
        }
        if let Some(url) = read("MEDUSA_BACKEND_URL") {
            self.backend.base_url = url;
        }
        self
    }

    /// Check URLs and names for obvious mistakes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("search.host", &self.search.host)?;
        validate_url("backend.base_url", &self.backend.base_url)?;
        if self.search.index.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "search.index".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.search.timeout_ms == 0 || self.backend.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn validate_url(key: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("expected an http(s) URL, got {:?}", url),
        })
    }
}

/// Generate a default storefront.toml.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration
# Environment variables override these values:
#   MEILISEARCH_HOST, MEILISEARCH_API_KEY, MEILISEARCH_INDEX, MEDUSA_BACKEND_URL

[search]
host = "http://127.0.0.1:7700"
# api_key = "..."
index = "products"
timeout_ms = 500

[backend]
base_url = "http://localhost:9000"
timeout_ms = 1000
"#
    .to_string()
}
