use crate::errors::IssueDeskError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "ISSUEDESK";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Where the browser front-end is served, for `issuedesk web`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Preferences {
    pub page_size: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Settings {
    /// Config file layered with `ISSUEDESK_<SECTION>__<FIELD>` environment overrides.
    /// A missing file means defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_layered(&config_path, ENV_PREFIX)
    }

    /// The file alone, without environment overrides. Used before rewriting it.
    pub fn load_file() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let settings: Settings = toml::from_str(&config_str)
            .map_err(|e| IssueDeskError::ConfigInvalid(e.to_string()))?;

        Ok(settings)
    }

    fn load_layered(path: &Path, env_prefix: &str) -> Result<Self> {
        let layered = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| IssueDeskError::ConfigInvalid(e.to_string()))?;

        let settings: Settings = layered
            .try_deserialize()
            .map_err(|e| IssueDeskError::ConfigInvalid(e.to_string()))?;

        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, config_str)
            .context("Failed to write config file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&config_path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&config_path, perms)?;
        }

        Ok(())
    }

    /// Sets one value addressed as `section.field`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid key format. Use format: section.field (e.g., api.base_url)");
        }

        match (parts[0], parts[1]) {
            ("api", "base_url") => self.api.base_url = value.trim_end_matches('/').to_string(),
            ("api", "timeout_secs") => {
                self.api.timeout_secs = value
                    .parse()
                    .with_context(|| format!("'{}' is not a number of seconds", value))?
            }
            ("ui", "url") => {
                self.ui.url = if value.is_empty() {
                    None
                } else {
                    Some(value.trim_end_matches('/').to_string())
                }
            }
            ("preferences", "page_size") => {
                self.preferences.page_size = value
                    .parse()
                    .with_context(|| format!("'{}' is not a page size", value))?
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }

        Ok(())
    }

    /// Checks the values without contacting the server.
    pub fn validate(&self) -> std::result::Result<(), IssueDeskError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(IssueDeskError::ConfigValidationFailed(format!(
                "api.base_url must start with http:// or https:// (got '{}')",
                url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(IssueDeskError::ConfigValidationFailed(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.preferences.page_size == 0 {
            return Err(IssueDeskError::ConfigValidationFailed(
                "preferences.page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".issuedesk"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("issuedesk-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_config_serialization() {
        let mut settings = Settings::default();
        settings.api.base_url = "https://issues.example.com".to_string();
        settings.ui.url = Some("https://app.example.com".to_string());

        let toml_str = toml::to_string(&settings).unwrap();
        assert!(toml_str.contains("https://issues.example.com"));

        let deserialized: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.api.base_url, "https://issues.example.com");
        assert_eq!(deserialized.ui.url.as_deref(), Some("https://app.example.com"));
        assert_eq!(deserialized.preferences.page_size, 10);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let settings: Settings = toml::from_str("[preferences]\npage_size = 25\n").unwrap();
        assert_eq!(settings.preferences.page_size, 25);
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.timeout_secs, 30);
    }

    #[test]
    fn test_layered_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("issuedesk-does-not-exist.toml");
        let settings = Settings::load_layered(&path, "ISSUEDESK_TEST_NOFILE").unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_layered_reads_file_and_env() {
        let path = scratch_file(
            "layered.toml",
            "[api]\nbase_url = \"http://tracker.local\"\ntimeout_secs = 5\n",
        );
        std::env::set_var("ISSUEDESK_TEST_ENV_PREFERENCES__PAGE_SIZE", "50");

        let settings = Settings::load_layered(&path, "ISSUEDESK_TEST_ENV").unwrap();

        assert_eq!(settings.api.base_url, "http://tracker.local");
        assert_eq!(settings.api.timeout_secs, 5);
        assert_eq!(settings.preferences.page_size, 50);
    }

    #[test]
    fn test_env_overrides_base_url() {
        let path = scratch_file(
            "override.toml",
            "[api]\nbase_url = \"http://from-file.local\"\n",
        );
        std::env::set_var("ISSUEDESK_TEST_URL_API__BASE_URL", "http://tracker:8000");

        let settings = Settings::load_layered(&path, "ISSUEDESK_TEST_URL").unwrap();

        assert_eq!(settings.api.base_url, "http://tracker:8000");
    }

    #[test]
    fn test_set_known_keys() {
        let mut settings = Settings::default();
        settings.set("api.base_url", "http://10.0.0.2:8000/").unwrap();
        settings.set("preferences.page_size", "20").unwrap();
        settings.set("ui.url", "http://localhost:4200").unwrap();

        assert_eq!(settings.api.base_url, "http://10.0.0.2:8000");
        assert_eq!(settings.preferences.page_size, 20);
        assert_eq!(settings.ui.url.as_deref(), Some("http://localhost:4200"));

        settings.set("ui.url", "").unwrap();
        assert!(settings.ui.url.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(settings.set("api", "x").is_err());
        assert!(settings.set("api.token", "x").is_err());
        assert!(settings.set("preferences.page_size", "many").is_err());
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.api.base_url = "localhost:8000".to_string();
        assert!(settings.validate().is_err());

        settings.api.base_url = "http://localhost:8000".to_string();
        settings.preferences.page_size = 0;
        assert!(settings.validate().is_err());
    }
}
