//! Configuration for the Seeker search client.
//!
//! Provides TOML-based configuration with:
//! - A single `[service]` section naming the remote tool service
//! - Config directory resolution (`SEEKER_CONFIG_DIR` → platform default)
//! - Base URL resolution (explicit override → config file → built-in default)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    config_dir, config_path, credentials_path, load_config, load_config_file, log_dir,
    resolve_base_url, save_config,
};
pub use error::{ConfigError, Result};
pub use types::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, SeekerConfig, ServiceConfig};
