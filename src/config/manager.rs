use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StartupError;
use crate::paths;

/// Where languages, source documents and translations live.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Newline-delimited list of language names.
    pub languages: PathBuf,
    /// Directory scanned for documents to translate.
    pub documents: PathBuf,
    /// Directory receiving `{stem}_{language}{ext}` output files.
    pub translations: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            languages: PathBuf::from("languages.txt"),
            documents: PathBuf::from("documents"),
            translations: PathBuf::from("translations"),
        }
    }
}

/// Settings for the OpenAI-compatible translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    /// Upper bound for a single backend call.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            api_key: None,
            api_key_env: None,
            timeout_secs: 120,
        }
    }
}

impl BackendConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Word count above which the status line flags the current segment.
    pub word_warning: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { word_warning: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` level filter: off, error, warn, info, debug or trace.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/segtran/config.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub paths: PathsConfig,
    pub backend: BackendConfig,
    pub review: ReviewConfig,
    pub log: LogConfig,
}

/// Manages loading the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is read from `$XDG_CONFIG_HOME/segtran/config.toml`
    /// or `~/.config/segtran/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager reading an explicit path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    ///
    /// A file that exists but cannot be parsed is a [`StartupError`].
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file =
            toml::from_str(&contents).map_err(|e| StartupError::InvalidConfig {
                path: self.config_path.clone(),
                message: e.message().to_string(),
            })?;

        Ok(config_file)
    }
}
