//! Configuration types.
//!
//! ```toml
//! [service]
//! base_url = "https://search.example.com"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;

/// Base URL used when neither an override nor the config file names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeekerConfig {
    /// Remote tool service settings.
    pub service: ServiceConfig,
}

impl SeekerConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// `[service]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the tool service. The JSON-RPC endpoint lives at `<base_url>/mcp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout override (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// Effective timeout, falling back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_section() {
        let config = SeekerConfig::from_toml(
            r#"
[service]
base_url = "https://search.example.com"
timeout_secs = 10
"#,
        )
        .unwrap();

        assert_eq!(
            config.service.base_url.as_deref(),
            Some("https://search.example.com")
        );
        assert_eq!(config.service.timeout_secs(), 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SeekerConfig::from_toml("").unwrap();
        assert!(config.service.base_url.is_none());
        assert_eq!(config.service.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_toml_roundtrip_omits_unset_fields() {
        let config = SeekerConfig {
            service: ServiceConfig {
                base_url: Some("http://10.0.0.2:9000".to_string()),
                timeout_secs: None,
            },
        };
        let text = config.to_toml().unwrap();
        assert!(!text.contains("timeout_secs"));
        assert_eq!(SeekerConfig::from_toml(&text).unwrap(), config);
    }
}
