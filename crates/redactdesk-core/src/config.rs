//! API configuration.
//!
//! The console builds one [`ApiConfig`] at startup and derives the HTTP
//! client from it. Nothing here is process-global: every resource hook
//! receives the client explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default freshness window for cached lists.
pub const DEFAULT_STALE_TIME_SECS: u64 = 60;

/// Optional console features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// Email workflows: forwarding messages and creating filter rules.
    pub email: bool,
}

/// How to reach and authenticate against the review API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API gateway origin, e.g. `https://abc.execute-api.eu-west-1.amazonaws.com`.
    pub api_gateway_url: String,
    /// Deployment base path, e.g. `/prod`.
    pub base_path: String,
    /// API prefix, e.g. `/api`.
    pub api_path: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// How long a fetched list stays fresh, in seconds.
    pub stale_time_secs: u64,
    /// Whether requests carry a bearer token.
    pub auth_enabled: bool,
    /// Optional features.
    pub features: FeatureSet,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_gateway_url: "http://localhost:3000".to_string(),
            base_path: String::new(),
            api_path: "/api".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            stale_time_secs: DEFAULT_STALE_TIME_SECS,
            auth_enabled: false,
            features: FeatureSet::default(),
        }
    }
}

impl ApiConfig {
    /// Creates a config pointing at `api_gateway_url` with no base or API path.
    #[must_use]
    pub fn for_url(api_gateway_url: impl Into<String>) -> Self {
        Self {
            api_gateway_url: api_gateway_url.into(),
            api_path: String::new(),
            ..Self::default()
        }
    }

    /// Gateway URL, base path and API path joined, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let joined = format!("{}{}{}", self.api_gateway_url, self.base_path, self.api_path);
        joined.trim_end_matches('/').to_string()
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cache freshness window.
    #[must_use]
    pub const fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    /// Default config file location: `<config dir>/redactdesk/config.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("redactdesk")
            .join("config.json")
    }

    /// Loads the config from the default location, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if an override has an invalid value.
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()).await
    }

    /// Loads the config from `path`, then applies environment overrides.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if an override has an invalid value.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let mut config = if tokio::fs::try_exists(path).await? {
            let contents = tokio::fs::read_to_string(path).await?;
            debug!("Loaded API config from {:?}", path);
            serde_json::from_str(&contents)?
        } else {
            debug!("No API config at {:?}, using defaults", path);
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        info!(
            "API base URL: {} (auth: {}, email: {})",
            config.base_url(),
            config.auth_enabled,
            config.features.email
        );
        Ok(config)
    }

    /// Applies `REDACTDESK_*` overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a boolean or numeric override does not
    /// parse, or if the resulting timeout is zero.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("REDACTDESK_API_URL") {
            self.api_gateway_url = url;
        }
        if let Some(base) = lookup("REDACTDESK_BASE_PATH") {
            self.base_path = base;
        }
        if let Some(api) = lookup("REDACTDESK_API_PATH") {
            self.api_path = api;
        }
        if let Some(value) = lookup("REDACTDESK_AUTH_ENABLED") {
            self.auth_enabled = parse_flag("REDACTDESK_AUTH_ENABLED", &value)?;
        }
        if let Some(value) = lookup("REDACTDESK_EMAIL_ENABLED") {
            self.features.email = parse_flag("REDACTDESK_EMAIL_ENABLED", &value)?;
        }
        if let Some(value) = lookup("REDACTDESK_TIMEOUT_SECS") {
            self.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("REDACTDESK_TIMEOUT_SECS: '{value}'")))?;
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "REDACTDESK_TIMEOUT_SECS: timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::Config(format!("{key}: expected a boolean, got '{value}'"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.stale_time(), Duration::from_secs(60));
        assert!(!config.auth_enabled);
        assert!(!config.features.email);
        assert_eq!(config.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn test_base_url_concatenates_parts() {
        let config = ApiConfig {
            api_gateway_url: "https://gw.example.com".to_string(),
            base_path: "/prod".to_string(),
            api_path: "/api/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(config.base_url(), "https://gw.example.com/prod/api");
    }

    #[test]
    fn test_overrides() {
        let mut config = ApiConfig::default();
        config
            .apply_overrides(env(&[
                ("REDACTDESK_API_URL", "https://gw"),
                ("REDACTDESK_AUTH_ENABLED", "true"),
                ("REDACTDESK_EMAIL_ENABLED", "1"),
                ("REDACTDESK_TIMEOUT_SECS", "5"),
            ]))
            .unwrap();
        assert_eq!(config.api_gateway_url, "https://gw");
        assert!(config.auth_enabled);
        assert!(config.features.email);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_overrides(env(&[("REDACTDESK_AUTH_ENABLED", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_timeout_is_config_error() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_overrides(env(&[("REDACTDESK_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let mut from_file = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(from_file.apply_overrides(env(&[])).is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"auth_enabled": true, "features": {"email": true}}"#).unwrap();
        assert!(config.auth_enabled);
        assert!(config.features.email);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("redactdesk-missing-config.json");
        let config = tokio_test::block_on(ApiConfig::load_from(&path)).unwrap();
        assert_eq!(config.stale_time_secs, DEFAULT_STALE_TIME_SECS);
    }
}
