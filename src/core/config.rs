//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.userdir/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The only environment variable read is `USERDIR_API_URL`.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserDirConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const API_URL_ENV: &str = "USERDIR_API_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = crate::api::DEFAULT_TIMEOUT_MS;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "userdir.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub timeout_ms: u64,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.userdir/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".userdir").join("config.toml"))
}

/// Load config from `~/.userdir/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `UserDirConfig::default()`.
pub fn load_config() -> Result<UserDirConfig, ConfigError> {
    match config_path() {
        Some(path) => {
            if !path.exists() {
                info!("No config file found, generating default at {}", path.display());
                generate_default_config(&path);
                return Ok(UserDirConfig::default());
            }
            load_config_from(&path)
        }
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(UserDirConfig::default())
        }
    }
}

/// Load config from an explicit path. A missing file is an error here:
/// the user asked for this file by name.
pub fn load_config_from(path: &Path) -> Result<UserDirConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: UserDirConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# userdir configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → USERDIR_API_URL → CLI flags.

# [api]
# base_url = "http://localhost:3000/api"
# timeout_ms = 5000

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "userdir.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_api_url` is the `--api-url` flag (None = not specified).
pub fn resolve(config: &UserDirConfig, cli_api_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_api_url, std::env::var(API_URL_ENV).ok())
}

/// [`resolve`] with the environment value passed in, so tests don't touch
/// process-global state.
pub fn resolve_with_env(
    config: &UserDirConfig,
    cli_api_url: Option<&str>,
    env_api_url: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let api_base_url = cli_api_url
        .map(str::to_string)
        .or(env_api_url)
        .or_else(|| config.api.base_url.clone())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let log_level = match config.logging.level.as_deref() {
        Some(level) => level.parse::<LevelFilter>().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        api_base_url,
        timeout_ms: config
            .api
            .timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS),
        log_level,
        log_file: PathBuf::from(
            config
                .logging
                .file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
    }
}
