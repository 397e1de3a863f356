//! Configuration: `~/.copymill/config.toml`, created with defaults on first
//! run, with environment overrides applied after loading.

use crate::error::{MillError, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_DIR: &str = ".copymill";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub backend: BackendConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f64,
    /// Usually left out of the file and supplied via environment.
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: "openrouter".to_string(),
            model: "google/gemini-2.0-flash-001".to_string(),
            temperature: 0.7,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            user_agent: "CopymillBot/0.1 (+https://github.com/copymill/copymill)".to_string(),
            max_redirects: 5,
        }
    }
}

impl Config {
    /// Load the config file, writing a default one first if it is missing.
    pub fn load_or_init() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let default = Self::default();
            default.save(&path)?;
            return Ok(default);
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|err| MillError::Config(format!("failed to read {}: {err}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|err| MillError::Config(format!("invalid {}: {err}", path.display())))
    }

    /// Environment variables win over file values. `COPYMILL_API_KEY` is
    /// checked first, then the conventional `OPENROUTER_API_KEY`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("COPYMILL_API_KEY") {
            if !key.trim().is_empty() {
                self.backend.api_key = Some(key);
            }
        } else if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.trim().is_empty() {
                self.backend.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("COPYMILL_MODEL") {
            if !model.trim().is_empty() {
                self.backend.model = model;
            }
        }
    }

    fn save(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                MillError::Config(format!("failed to create {}: {err}", parent.display()))
            })?;
        }
        let rendered = toml::to_string_pretty(self)
            .map_err(|err| MillError::Config(format!("failed to render config: {err}")))?;
        std::fs::write(path, rendered)
            .map_err(|err| MillError::Config(format!("failed to write {}: {err}", path.display())))
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = UserDirs::new()
            .ok_or_else(|| MillError::Config("cannot resolve the home directory".to_string()))?;
        Ok(dirs.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.gateway.port, 8787);
        assert_eq!(config.backend.provider, "openrouter");
        assert_eq!(config.extract.timeout_secs, 12);
        assert!(config.backend.api_key.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gateway]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.backend.model, "google/gemini-2.0-flash-001");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.backend.temperature = 0.3;
        config.extract.max_redirects = 2;
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert!((parsed.backend.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(parsed.extract.max_redirects, 2);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::default().save(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[gateway]"));
    }
}
