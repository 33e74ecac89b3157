use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable that overrides the Currency Freaks API key.
pub const API_KEY_ENV: &str = "CURRENCY_FREAKS_API_KEY";

/// Documented placeholder key; when configured the service only uses fallback rates.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CurrencyFreaksConfig {
    #[serde(default = "default_currency_freaks_url")]
    pub base_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_currency_freaks_url() -> String {
    "https://api.currencyfreaks.com/v2.0/rates/latest".to_string()
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CurrencyFreaksConfig {
    fn default() -> Self {
        CurrencyFreaksConfig {
            base_url: default_currency_freaks_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CurrencyFreaksConfig {
    /// True when a real key is configured and live rates should be requested.
    pub fn has_api_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub currency_freaks: CurrencyFreaksConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config at `path`, or the default location when `None`.
    ///
    /// A missing file at the default location yields the built-in defaults;
    /// a missing file at an explicit path is an error. Environment overrides
    /// are applied last.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Self::load_from_path(&default_path)?
                } else {
                    debug!(path = %default_path.display(), "No config file, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("app", "globobudget", "globobudget")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from {}", API_KEY_ENV);
            self.providers.currency_freaks.api_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  host: "127.0.0.1"
  port: 8080
providers:
  currency_freaks:
    base_url: "http://example.com/rates"
    api_key: "secret"
    timeout_secs: 3
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.address(), "127.0.0.1:8080");
        let provider = &config.providers.currency_freaks;
        assert_eq!(provider.base_url, "http://example.com/rates");
        assert_eq!(provider.api_key, "secret");
        assert_eq!(provider.timeout(), Duration::from_secs(3));
        assert!(provider.has_api_key());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
server:
  port: 9000
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.providers, ProvidersConfig::default());
        assert_eq!(config.providers.currency_freaks.timeout_secs, 10);
        assert!(!config.providers.currency_freaks.has_api_key());
    }

    #[test]
    fn test_placeholder_and_blank_keys_mean_no_key() {
        let mut provider = CurrencyFreaksConfig::default();
        assert!(!provider.has_api_key());
        provider.api_key = "   ".to_string();
        assert!(!provider.has_api_key());
        provider.api_key = "abc123".to_string();
        assert!(provider.has_api_key());
    }

    #[test]
    fn test_env_override_replaces_api_key() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| (name == API_KEY_ENV).then(|| "from-env".to_string()));
        assert_eq!(config.providers.currency_freaks.api_key, "from-env");

        let mut untouched = AppConfig::default();
        untouched.apply_overrides(|_| Some(String::new()));
        assert_eq!(
            untouched.providers.currency_freaks.api_key,
            PLACEHOLDER_API_KEY
        );
    }

    #[test]
    fn test_load_from_explicit_path() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "server:\n  port: 6000")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.server.port, 6000);
        Ok(())
    }

    #[test]
    fn test_load_fails_for_missing_explicit_path() {
        let result = AppConfig::load(Some("/nonexistent/globobudget/config.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
