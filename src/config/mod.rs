//! Configuration for Sextant.
//!
//! User preferences live in a TOML file:
//!
//! - System: `~/.config/sextant/config.toml`
//! - Override: the `SX_CONFIG_DIR` environment variable points at an
//!   alternate directory (used by tests for isolation)
//!
//! Keys:
//! - `output-format` - "json" (default) or "human"
//! - `locale` - "en" (default) or "es", language of explanation text
//! - `data-path` - default dataset location when `--data`/`SX_DATA` are absent
//!
//! Precedence everywhere: CLI flag > environment variable > config file >
//! built-in default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Locale;
use crate::{Error, Result};

/// Output rendering preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Human,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Human => write!(f, "human"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Unknown output format: {} (expected json or human)", s)),
        }
    }
}

/// User preferences, all optional so absent keys fall through to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SextantConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

impl SextantConfig {
    /// Directory holding the config file.
    ///
    /// `SX_CONFIG_DIR` overrides the XDG location when set.
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("SX_CONFIG_DIR") {
            return Some(PathBuf::from(dir));
        }
        dirs::config_dir().map(|d| d.join("sextant"))
    }

    /// Full path of the config file, if a config directory can be resolved.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load preferences, returning defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load preferences from a specific file, defaulting when it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw).map_err(|e| Error::Config(e.to_string()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Persist preferences, creating the config directory as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("cannot resolve a config directory".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Read a single key's value, `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "output-format" => Ok(self.output_format.map(|v| v.to_string())),
            "locale" => Ok(self.locale.map(|v| v.to_string())),
            "data-path" => Ok(self
                .data_path
                .as_ref()
                .map(|p| p.display().to_string())),
            _ => Err(Error::InvalidInput(format!("unknown config key: {}", key))),
        }
    }

    /// Set a single key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output-format" => {
                self.output_format = Some(value.parse().map_err(Error::InvalidInput)?);
            }
            "locale" => {
                self.locale = Some(value.parse().map_err(Error::InvalidInput)?);
            }
            "data-path" => {
                self.data_path = Some(PathBuf::from(value));
            }
            _ => return Err(Error::InvalidInput(format!("unknown config key: {}", key))),
        }
        Ok(())
    }

    /// All keys with their current values, for `sx config list`.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("output-format", self.output_format.map(|v| v.to_string())),
            ("locale", self.locale.map(|v| v.to_string())),
            (
                "data-path",
                self.data_path.as_ref().map(|p| p.display().to_string()),
            ),
        ]
    }
}
