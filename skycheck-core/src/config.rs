use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Default upstream API root; overridable for self-hosted proxies and tests.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Environment variable overriding the stored API key.
pub const ENV_API_KEY: &str = "SKYCHECK_API_KEY";
/// Environment variable overriding the stored base URL.
pub const ENV_BASE_URL: &str = "SKYCHECK_API_BASE_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Resolved settings handed to `WeatherClient::new`. The client never reads
/// ambient process state; everything it needs arrives through this struct.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycheck", "skycheck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the settings the weather client needs, applying environment
    /// overrides on top of the stored values. Precedence: environment, then
    /// config file, then (for the base URL only) the built-in default.
    pub fn client_settings(&self) -> Result<ClientSettings> {
        self.client_settings_from(env::var(ENV_API_KEY).ok(), env::var(ENV_BASE_URL).ok())
    }

    /// Resolution with the environment layer injected, so precedence is
    /// testable without mutating process env.
    fn client_settings_from(
        &self,
        api_key_env: Option<String>,
        base_url_env: Option<String>,
    ) -> Result<ClientSettings> {
        let api_key = api_key_env
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `skycheck configure` and enter your API key, \
                     or set {ENV_API_KEY}."
                )
            })?;

        let base_url = base_url_env
            .filter(|v| !v.is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ClientSettings { api_key, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Set/replace the stored API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mutating process env in parallel unit tests is racy, so precedence is
    // asserted through the injected-env resolution path.

    #[test]
    fn client_settings_errors_when_no_key_anywhere() {
        let cfg = Config::default();
        let err = cfg.client_settings_from(None, None).unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `skycheck configure`"));
    }

    #[test]
    fn client_settings_defaults_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let settings = cfg.client_settings_from(None, None).expect("key is stored");
        assert_eq!(settings.api_key, "KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn client_settings_prefers_stored_base_url_over_default() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9999".into()),
        };

        let settings = cfg.client_settings_from(None, None).expect("key is stored");
        assert_eq!(settings.base_url, "http://localhost:9999");
    }

    #[test]
    fn env_values_beat_stored_values() {
        let cfg = Config {
            api_key: Some("STORED_KEY".into()),
            base_url: Some("http://stored:1".into()),
        };

        let settings = cfg
            .client_settings_from(Some("ENV_KEY".into()), Some("http://env:2".into()))
            .expect("key available");
        assert_eq!(settings.api_key, "ENV_KEY");
        assert_eq!(settings.base_url, "http://env:2");
    }

    #[test]
    fn blank_env_values_fall_through_to_stored_values() {
        let cfg = Config {
            api_key: Some("STORED_KEY".into()),
            base_url: Some("http://stored:1".into()),
        };

        let settings = cfg
            .client_settings_from(Some(String::new()), Some(String::new()))
            .expect("stored key still applies");
        assert_eq!(settings.api_key, "STORED_KEY");
        assert_eq!(settings.base_url, "http://stored:1");
    }

    #[test]
    fn env_key_alone_is_sufficient() {
        let cfg = Config::default();

        let settings = cfg
            .client_settings_from(Some("ENV_KEY".into()), None)
            .expect("env key suffices");
        assert_eq!(settings.api_key, "ENV_KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn set_api_key_marks_config_as_configured() {
        let mut cfg = Config::default();
        assert!(!cfg.is_configured());

        cfg.set_api_key("KEY".into());
        assert!(cfg.is_configured());
    }
}
