//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `LEAVESYNC_SF_BASE_URL`: SuccessFactors OData root
//! - `LEAVESYNC_SF_USERNAME` / `LEAVESYNC_SF_PASSWORD`: API credentials
//!
//! Optional:
//! - `LEAVESYNC_SF_TIMEOUT_SECONDS`, `LEAVESYNC_SF_MAX_ATTEMPTS`
//! - `LEAVESYNC_BIND_ADDRESS`
//! - `LEAVESYNC_CACHE_TTL_SECONDS`, `LEAVESYNC_CACHE_MAX_CAPACITY`
//! - `LEAVESYNC_GOOGLE_ACCESS_TOKEN` (enables the Google provider),
//!   `LEAVESYNC_GOOGLE_CALENDAR_API_BASE`, `LEAVESYNC_GOOGLE_GMAIL_API_BASE`
//! - `LEAVESYNC_LOG_LEVEL`, `LEAVESYNC_LOG_JSON` (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./leavesync.{toml,json}` then `./config.{toml,json}`
//! 2. The same names in the parent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use leavesync_domain::constants::{DEFAULT_GMAIL_API_BASE, DEFAULT_GOOGLE_CALENDAR_API_BASE};
use leavesync_domain::{
    CacheConfig, Config, GoogleConfig, LeaveSyncError, LoggingConfig, Result, ServerConfig,
    SuccessFactorsConfig,
};

const CONFIG_FILE_NAMES: &[&str] =
    &["leavesync.toml", "leavesync.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LeaveSyncError::Config` if configuration cannot be loaded from
/// either source or the file is invalid.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `LeaveSyncError::Config` if required variables are missing or a
/// numeric variable cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let defaults = CacheConfig::default();
    let successfactors = SuccessFactorsConfig {
        base_url: env_var("LEAVESYNC_SF_BASE_URL")?,
        username: env_var("LEAVESYNC_SF_USERNAME")?,
        password: env_var("LEAVESYNC_SF_PASSWORD")?,
        timeout_seconds: env_parse("LEAVESYNC_SF_TIMEOUT_SECONDS")?
            .unwrap_or(leavesync_domain::constants::DEFAULT_HTTP_TIMEOUT_SECONDS),
        max_attempts: env_parse("LEAVESYNC_SF_MAX_ATTEMPTS")?
            .unwrap_or(leavesync_domain::constants::DEFAULT_HTTP_MAX_ATTEMPTS),
    };

    let google = match env_opt("LEAVESYNC_GOOGLE_ACCESS_TOKEN") {
        Some(access_token) => Some(GoogleConfig {
            calendar_api_base: env_opt("LEAVESYNC_GOOGLE_CALENDAR_API_BASE")
                .unwrap_or_else(|| DEFAULT_GOOGLE_CALENDAR_API_BASE.to_string()),
            gmail_api_base: env_opt("LEAVESYNC_GOOGLE_GMAIL_API_BASE")
                .unwrap_or_else(|| DEFAULT_GMAIL_API_BASE.to_string()),
            access_token,
            timeout_seconds: successfactors.timeout_seconds,
        }),
        None => None,
    };

    Ok(Config {
        server: ServerConfig {
            bind_address: env_opt("LEAVESYNC_BIND_ADDRESS")
                .unwrap_or_else(|| ServerConfig::default().bind_address),
        },
        cache: CacheConfig {
            ttl_seconds: env_parse("LEAVESYNC_CACHE_TTL_SECONDS")?.unwrap_or(defaults.ttl_seconds),
            max_capacity: env_parse("LEAVESYNC_CACHE_MAX_CAPACITY")?
                .unwrap_or(defaults.max_capacity),
        },
        successfactors,
        google,
        logging: LoggingConfig {
            level: env_opt("LEAVESYNC_LOG_LEVEL").unwrap_or_else(|| LoggingConfig::default().level),
            json: env_bool("LEAVESYNC_LOG_JSON", false),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `LeaveSyncError::Config` if the file is missing, unreadable or
/// invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LeaveSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LeaveSyncError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LeaveSyncError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration content; format is chosen by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LeaveSyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LeaveSyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LeaveSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        LeaveSyncError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-empty value of `key`.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| LeaveSyncError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
