//! Config file discovery and base URL resolution.
//!
//! Resolution order for the service base URL (first wins):
//! 1. Explicit override (CLI `--server` / `SEEKER_SERVER_URL`, handled by the caller)
//! 2. `service.base_url` in `<config dir>/config.toml`
//! 3. [`DEFAULT_BASE_URL`]

use std::path::{Path, PathBuf};

use crate::{ConfigError, DEFAULT_BASE_URL, Result, SeekerConfig};

/// Config filename within the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Persisted credential filename within the config directory.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Application name for directory resolution.
const APP_NAME: &str = "seeker";

/// Environment variable to override the config directory.
///
/// When set, this takes precedence over the platform default.
const CONFIG_DIR_ENV: &str = "SEEKER_CONFIG_DIR";

/// Get the config directory for seeker.
///
/// Checks `SEEKER_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/seeker` on Linux, `~/Library/Application Support/seeker` on macOS).
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Path of `config.toml` inside the config directory.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}

/// Path of the persisted credential file.
pub fn credentials_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CREDENTIALS_FILE))
}

/// Directory for rotated log files.
pub fn log_dir() -> PathBuf {
    config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Load configuration from `dir/config.toml`, or the default config directory.
///
/// A missing file is not an error; defaults apply.
pub fn load_config(dir: Option<&Path>) -> Result<SeekerConfig> {
    let path = match dir {
        Some(dir) => dir.join(CONFIG_FILE),
        None => match config_path() {
            Some(path) => path,
            None => return Ok(SeekerConfig::default()),
        },
    };

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(SeekerConfig::default());
    }

    let config = load_config_file(&path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<SeekerConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    SeekerConfig::from_toml(&contents)
}

/// Save configuration to a file.
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &SeekerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_toml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Pick the service base URL.
///
/// Blank values are treated as unset so an empty env var falls through.
pub fn resolve_base_url(explicit: Option<&str>, config: &SeekerConfig) -> String {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            config
                .service
                .base_url
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}
