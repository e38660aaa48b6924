//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sfm_client::ClientConfig;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Backend profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Connection settings
    #[serde(flatten)]
    pub client: ClientConfig,
}

impl Profile {
    /// Profile for a backend URL with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ClientConfig::new(base_url),
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sfm").join("config.toml"))
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles.get(&self.active_profile).ok_or_else(|| {
            CliError::Config(format!("Profile '{}' not found", self.active_profile))
        })
    }

    /// Client settings of the active profile, with `base_url` overridden
    /// when given (from `--base-url` or `SFM_BASE_URL`).
    pub fn client_config(&self, base_url: Option<&str>) -> Result<ClientConfig> {
        let mut client = self.get_active_profile()?.client.clone();
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            client.base_url = url.to_string();
        }
        client.validate().map_err(CliError::Config)?;
        Ok(client)
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                client: ClientConfig::default(),
            },
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(
            config.get_active_profile().unwrap().client.base_url,
            "http://localhost:8000"
        );
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            client: ClientConfig::new("https://sfm.example.org").with_lang("es"),
        };

        config.set_profile("staging".to_string(), profile);
        assert!(config.profiles.contains_key("staging"));

        config.switch_profile("staging".to_string()).unwrap();
        assert_eq!(config.active_profile, "staging");
        assert_eq!(config.client_config(None).unwrap().lang, "es");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default();
        let client = config.client_config(Some("https://override.test")).unwrap();
        assert_eq!(client.base_url, "https://override.test");

        assert!(config.client_config(Some("ftp://nope")).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_profile(
            "prod".to_string(),
            Profile {
                client: ClientConfig::new("https://sfm.example.org")
                    .with_csrf_token("abc")
                    .with_timeout_secs(5),
            },
        );
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.profiles["prod"], config.profiles["prod"]);
        assert_eq!(loaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_partial_profile_uses_client_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "active_profile = \"local\"\n\n[profiles.local]\nbase_url = \"http://127.0.0.1:8000\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let client = config.client_config(None).unwrap();
        assert_eq!(client.lang, "en");
        assert_eq!(client.timeout_secs, 30);
        assert!(config.settings.color);
    }
}
