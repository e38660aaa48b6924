//! Configuration for the HTTP backend

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default backend location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default interface language
pub const DEFAULT_LANG: &str = "en";

/// Default timeout for backend requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the records backend.
///
/// `lang` and `csrf_token` are what the page exposes as `window.LANG` and
/// `window.CSRF_TOKEN`; every state-changing request carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the backend
    pub base_url: String,

    /// Language prefix used for state-changing endpoints
    #[serde(default = "default_lang")]
    pub lang: String,

    /// CSRF token sent with every POST
    #[serde(default)]
    pub csrf_token: String,

    /// Maximum time for a single request (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Form field the record document is posted under on save.
    /// `None` uses the record type (`person`, `organization`); most
    /// deployments of the records app read a literal `object` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_form_key: Option<String>,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the language prefix
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the CSRF token
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = token.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the form field used for the record document on save
    pub fn with_save_form_key(mut self, key: impl Into<String>) -> Self {
        self.save_form_key = Some(key.into());
        self
    }

    /// Form field a save of `record_type` is posted under
    pub fn save_form_key<'a>(&'a self, record_type: &'a str) -> &'a str {
        self.save_form_key.as_deref().unwrap_or(record_type)
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if self.lang.trim().is_empty() {
            return Err("lang must not be empty".to_string());
        }
        if self.lang.contains('/') {
            return Err("lang must be a single path segment".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if matches!(&self.save_form_key, Some(key) if key.trim().is_empty()) {
            return Err("save_form_key must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            csrf_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            save_form_key: None,
        }
    }
}
