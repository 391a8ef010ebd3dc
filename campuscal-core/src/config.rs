//! Global campuscal configuration.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{CampusCalError, CampusCalResult};

static DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Environment override for the bearer token.
pub const TOKEN_ENV: &str = "CAMPUSCAL_TOKEN";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Global configuration at ~/.config/campuscal/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct CampusCalConfig {
    /// Base URL of the remote calendar service.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bearer token for the remote service. Absent (and no `CAMPUSCAL_TOKEN`
    /// in the environment) means cache-only mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Override for where the local cache file lives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for CampusCalConfig {
    fn default() -> Self {
        CampusCalConfig {
            api_base: default_api_base(),
            token: None,
            data_dir: None,
        }
    }
}

impl CampusCalConfig {
    pub fn load() -> CampusCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: CampusCalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| CampusCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CampusCalError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn config_path() -> CampusCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CampusCalError::Config("Could not determine config directory".into()))?
            .join("campuscal");

        Ok(config_dir.join("config.toml"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> CampusCalResult<()> {
        let contents = format!(
            "\
# campuscal configuration

# Base URL of the remote calendar service:
# api_base = \"{}\"

# Bearer token for the remote service (or set {} in the environment).
# Without a token, campuscal runs against the local cache only:
# token = \"...\"

# Where the local cache lives:
# data_dir = \"~/.local/share/campuscal\"
",
            DEFAULT_API_BASE, TOKEN_ENV
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CampusCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CampusCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The effective bearer token; the environment wins over the file.
    pub fn token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }

    /// Where the local cache file lives.
    pub fn cache_path(&self) -> CampusCalResult<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| {
                    CampusCalError::Config("Could not determine data directory".into())
                })?
                .join("campuscal"),
        };
        Ok(dir.join("store.json"))
    }
}
