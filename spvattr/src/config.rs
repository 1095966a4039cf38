use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, ConfigResult},
    magic::{
        CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ARENA_CAPACITY, DEFAULT_CONTEXT_NAME,
        ENV_CONFIG_PATH,
    },
};

/// Settings of a [`Context`](crate::context::Context).
///
/// Every field has a default, so a configuration file only needs to list the
/// values it overrides:
///
/// ```rust
/// # use spvattr::config::ContextConfig;
/// let config = ContextConfig::from_toml_str("name = \"gpu-pass\"").unwrap();
/// assert_eq!(config.name, "gpu-pass");
/// assert!(!config.trace_interning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Name tagging every log line emitted by the context.
    pub name: String,

    /// Number of records each per-kind arena reserves up front.
    pub arena_capacity: usize,

    /// Log every newly published record at debug level.
    pub trace_interning: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTEXT_NAME.to_string(),
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            trace_interning: false,
        }
    }
}

impl ContextConfig {
    /// Get the default path to the configuration file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
            return config_path.into();
        }

        // Fallback to default paths based on OS
        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        path
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            source: e,
            file: "<string>".to_string(),
        })
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| ConfigError::ParseError {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Load the configuration at [`Self::default_path`], or the defaults if no
    /// such file exists.
    pub fn load_or_default() -> ConfigResult<Self> {
        let path = Self::default_path();
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let toml_str = toml::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
