//! Configuration for the Trello client
//!
//! Values come from three layers, lowest precedence first:
//!
//! 1. Built-in defaults (production API root, `read,write` scope)
//! 2. An optional TOML file at `~/.config/trello-cards/config.toml`
//! 3. Environment variables (`TRELLO_API_KEY`, `TRELLO_TOKEN`,
//!    `TRELLO_AUTH_SCOPE`, `TRELLO_API_BASE_URL`)
//!
//! The resulting [`Config`] is built once at startup and handed to the client.
//! Credentials are kept optional here; the client refuses to make a call
//! without them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Scope requested when building an authorization link
pub const DEFAULT_AUTH_SCOPE: &str = "read,write";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "TRELLO_API_KEY";

/// Environment variable holding the access token
pub const TOKEN_ENV: &str = "TRELLO_TOKEN";

/// Environment variable overriding the authorization scope
pub const AUTH_SCOPE_ENV: &str = "TRELLO_AUTH_SCOPE";

/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "TRELLO_API_BASE_URL";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// On-disk configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// API root override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Authorization scope override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_scope: Option<String>,
}

impl FileConfig {
    /// Load a config file, returning defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// API key, if configured
    pub api_key: Option<String>,
    /// Access token, if configured
    pub token: Option<String>,
    /// API root without a trailing slash
    pub base_url: String,
    /// Scope requested in authorization links
    pub auth_scope: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_scope: DEFAULT_AUTH_SCOPE.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("auth_scope", &self.auth_scope)
            .finish()
    }
}

impl Config {
    /// Load configuration from the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(paths::CONFIG_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map_or_else(paths::global_config, PathBuf::from);
        log::debug!("loading config from {}", path.display());
        let file = FileConfig::load(&path)?;
        Ok(Self::resolve(file, |name| std::env::var(name).ok()))
    }

    /// Layer environment lookups over a file config and the defaults
    ///
    /// Empty strings are treated as unset at every layer.
    #[must_use]
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |name: &str, fallback: Option<String>| {
            non_empty(env(name)).or_else(|| non_empty(fallback))
        };

        let base_url = pick(BASE_URL_ENV, file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key: pick(API_KEY_ENV, file.api_key),
            token: pick(TOKEN_ENV, file.token),
            base_url,
            auth_scope: pick(AUTH_SCOPE_ENV, file.auth_scope)
                .unwrap_or_else(|| DEFAULT_AUTH_SCOPE.to_string()),
        }
    }

    /// Replace the API root, trimming any trailing slash
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set both halves of the credential pair
    #[must_use]
    pub fn with_credentials(mut self, api_key: impl Into<String>, token: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.token = Some(token.into());
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
