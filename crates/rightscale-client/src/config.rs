//! Client configuration
//!
//! Settings can come from an `appsettings.json` style file, from
//! `RIGHTSCALE_*` environment variables, or both (environment wins).

use crate::error::RightScaleError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Default API endpoint
pub const DEFAULT_API_URL: &str = "https://my.rightscale.com";
/// API version sent in the `X-API-Version` header
pub const DEFAULT_API_VERSION: &str = "1.5";
/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection and session settings for [`crate::RightScaleClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "RightScaleAPI_URL")]
    pub api_url: String,
    #[serde(rename = "RightScaleAPI_Version")]
    pub api_version: String,
    #[serde(rename = "RightScaleAPI_TimeoutSecs")]
    pub timeout_secs: u64,
    /// Fetch tags for taggable resources whenever they are listed or shown
    #[serde(rename = "RightScaleAPI_AutoPopulateTags")]
    pub auto_populate_tags: bool,
    #[serde(rename = "RightScaleAPI_Email")]
    pub email: Option<String>,
    #[serde(rename = "RightScaleAPI_Password")]
    pub password: Option<String>,
    #[serde(rename = "RightScaleAPI_AccountID")]
    pub account_id: Option<String>,
    #[serde(rename = "RightScaleAPI_InstanceToken")]
    pub instance_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_populate_tags: false,
            email: None,
            password: None,
            account_id: None,
            instance_token: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `api_url` with every other setting defaulted
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load settings from a JSON file such as `appsettings.json`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RightScaleError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Parse settings from a JSON document
    pub fn from_json(raw: &str) -> Result<Self, RightScaleError> {
        serde_json::from_str(raw).map_err(|e| RightScaleError::Config(format!("invalid settings document: {e}")))
    }

    /// Defaults overlaid with `RIGHTSCALE_*` environment variables
    pub fn from_env() -> Result<Self, RightScaleError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay any `RIGHTSCALE_*` environment variables onto this configuration
    pub fn apply_env(&mut self) -> Result<(), RightScaleError> {
        self.apply_vars(|key| env::var(key).ok())
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), RightScaleError> {
        if let Some(url) = lookup("RIGHTSCALE_API_URL") {
            self.api_url = url;
        }
        if let Some(version) = lookup("RIGHTSCALE_API_VERSION") {
            self.api_version = version;
        }
        if let Some(raw) = lookup("RIGHTSCALE_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                RightScaleError::Config(format!("RIGHTSCALE_TIMEOUT_SECS must be a number of seconds, got '{raw}'"))
            })?;
        }
        if let Some(raw) = lookup("RIGHTSCALE_AUTO_POPULATE_TAGS") {
            self.auto_populate_tags = parse_bool("RIGHTSCALE_AUTO_POPULATE_TAGS", &raw)?;
        }
        if let Some(email) = lookup("RIGHTSCALE_EMAIL") {
            self.email = Some(email);
        }
        if let Some(password) = lookup("RIGHTSCALE_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(account) = lookup("RIGHTSCALE_ACCOUNT_ID") {
            self.account_id = Some(account);
        }
        if let Some(token) = lookup("RIGHTSCALE_INSTANCE_TOKEN") {
            self.instance_token = Some(token);
        }
        Ok(())
    }

    /// Account id, or a `Config` error naming what is missing
    pub fn require_account_id(&self) -> Result<&str, RightScaleError> {
        self.account_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| RightScaleError::Config("account id is not configured".to_string()))
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, RightScaleError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(RightScaleError::Config(format!("{key} must be true or false, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_production_api() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "https://my.rightscale.com");
        assert_eq!(config.api_version, "1.5");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.auto_populate_tags);
    }

    #[test]
    fn parses_appsettings_document() {
        let config = ClientConfig::from_json(
            r#"{
                "RightScaleAPI_URL": "https://us-4.rightscale.com",
                "RightScaleAPI_AutoPopulateTags": true,
                "RightScaleAPI_AccountID": "12345"
            }"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://us-4.rightscale.com");
        assert!(config.auto_populate_tags);
        assert_eq!(config.require_account_id().unwrap(), "12345");
        assert_eq!(config.api_version, "1.5");
    }

    #[test]
    fn rejects_malformed_document() {
        let err = ClientConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RightScaleError::Config(_)));
    }

    #[test]
    fn environment_overrides_file_values() {
        let vars: HashMap<&str, &str> = [
            ("RIGHTSCALE_API_URL", "http://localhost:9000"),
            ("RIGHTSCALE_AUTO_POPULATE_TAGS", "yes"),
            ("RIGHTSCALE_TIMEOUT_SECS", "5"),
            ("RIGHTSCALE_EMAIL", "ops@example.com"),
        ]
        .into_iter()
        .collect();
        let mut config = ClientConfig::new("https://my.rightscale.com");
        config
            .apply_vars(|key| vars.get(key).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(config.api_url, "http://localhost:9000");
        assert!(config.auto_populate_tags);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.email.as_deref(), Some("ops@example.com"));
        assert!(config.password.is_none());
    }

    #[test]
    fn bad_boolean_is_a_config_error() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_vars(|key| (key == "RIGHTSCALE_AUTO_POPULATE_TAGS").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, RightScaleError::Config(_)));
    }

    #[test]
    fn missing_account_is_reported() {
        let config = ClientConfig::default();
        assert!(config.require_account_id().is_err());
    }
}
