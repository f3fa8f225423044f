use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_COLOR: &str = "black";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid cursor width {width} in {config_path}: must be a positive number")]
    InvalidWidth { config_path: PathBuf, width: f64 },
}

/// `color = false` turns the inline colour off (styling comes from `class`
/// alone), `color = true` keeps the default, a string picks a colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSetting {
    Enabled(bool),
    Named(String),
}

impl Default for ColorSetting {
    fn default() -> Self {
        ColorSetting::Named(DEFAULT_COLOR.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color: ColorSetting,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_class: Option<String>,
    /// Fit dragged content to the document structure before showing it.
    pub compute_drop_point: bool,
    pub idle_timeout_ms: u64,
    pub drop_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorSetting::default(),
            width: 1.0,
            class: None,
            inactive_class: None,
            compute_drop_point: true,
            idle_timeout_ms: 5000,
            drop_timeout_ms: 20,
        }
    }
}

impl Config {
    pub fn color(&self) -> Option<&str> {
        match &self.color {
            ColorSetting::Enabled(true) => Some(DEFAULT_COLOR),
            ColorSetting::Enabled(false) => None,
            ColorSetting::Named(name) => Some(name),
        }
    }

    /// Loads the config at `config_path`. `~` and `$VAR` in the path are
    /// expanded first; a path that fails to expand is used as written. A
    /// missing file is `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = expand_path(config_path.as_ref());

        let content = match std::fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path,
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| {
            ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            }
        })?;
        config.validate(config_path).map(Some)
    }

    /// Loads `~/.config/dropcursor/config.toml`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Writes the config as TOML, creating parent directories as needed.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = expand_path(config_path.as_ref());
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        expand_path(Path::new("~/.config/dropcursor/config.toml"))
    }

    fn validate(self, config_path: PathBuf) -> Result<Self, ConfigError> {
        if self.width.is_finite() && self.width > 0.0 {
            Ok(self)
        } else {
            Err(ConfigError::InvalidWidth {
                config_path,
                width: self.width,
            })
        }
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .unwrap_or_else(|_| path.to_path_buf())
}
