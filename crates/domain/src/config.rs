//! Application configuration structures
//!
//! Loaded by `leavesync_infra::config` from the environment or a TOML/JSON
//! file. Every section except `successfactors` has defaults so config files
//! only need to state what differs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_CACHE_MAX_CAPACITY, DEFAULT_CACHE_TTL_SECONDS,
    DEFAULT_GMAIL_API_BASE, DEFAULT_GOOGLE_CALENDAR_API_BASE, DEFAULT_HTTP_MAX_ATTEMPTS,
    DEFAULT_HTTP_TIMEOUT_SECONDS,
};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub successfactors: SuccessFactorsConfig,
    /// Google provider; when absent no calendar provider is registered.
    #[serde(default)]
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: default_bind_address() }
    }
}

/// Leave window cache settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: DEFAULT_CACHE_TTL_SECONDS, max_capacity: DEFAULT_CACHE_MAX_CAPACITY }
    }
}

/// SuccessFactors OData connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct SuccessFactorsConfig {
    /// OData root, e.g. `https://api4.successfactors.com/odata/v2`
    pub base_url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl fmt::Debug for SuccessFactorsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuccessFactorsConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Google Calendar / Gmail provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default = "default_calendar_api_base")]
    pub calendar_api_base: String,
    #[serde(default = "default_gmail_api_base")]
    pub gmail_api_base: String,
    /// Bearer token with domain-wide calendar and gmail settings scopes.
    pub access_token: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("calendar_api_base", &self.calendar_api_base)
            .field("gmail_api_base", &self.gmail_api_base)
            .field("access_token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_MAX_CAPACITY
}

fn default_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_max_attempts() -> usize {
    DEFAULT_HTTP_MAX_ATTEMPTS
}

fn default_calendar_api_base() -> String {
    DEFAULT_GOOGLE_CALENDAR_API_BASE.to_string()
}

fn default_gmail_api_base() -> String {
    DEFAULT_GMAIL_API_BASE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
