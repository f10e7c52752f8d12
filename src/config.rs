use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable holding the evaluation API base URL
pub const BASE_URL_ENV: &str = "API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Survey configuration, read from an optional TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL used when neither the environment nor an override provides one
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    /// Base URL that takes precedence over `API_BASE_URL`
    #[serde(default)]
    pub base_url_override: Option<String>,
    /// Directory receiving draft files
    #[serde(default = "default_drafts_dir")]
    pub drafts_dir: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_drafts_dir() -> PathBuf {
    PathBuf::from("feedback_data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            base_url_override: None,
            drafts_dir: default_drafts_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Load the file if one was given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Pick the base URL: command line, then override, then environment, then file/default
    pub fn resolve_base_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        let chosen = match (cli, self.base_url_override.as_deref(), env) {
            (Some(url), _, _) => url,
            (None, Some(url), env) => {
                if let Some(shadowed) = env {
                    warn!(
                        override_url = url,
                        env_url = shadowed,
                        "base_url_override shadows {}", BASE_URL_ENV
                    );
                }
                url
            }
            (None, None, Some(url)) => url,
            (None, None, None) => self.api_base_url.as_str(),
        };
        chosen.trim_end_matches('/').to_string()
    }
}
