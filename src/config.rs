//! Command-line defaults stored in `~/.stegtext/config.toml`.
//!
//! ```toml
//! lossy_text = false
//! log_level = "info"
//! ```
//!
//! The codec itself takes no configuration; these settings only shape how
//! the CLI calls it.

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decoder::{DecoderConfig, Utf8Policy};

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid log_level '{0}': expected off, error, warn, info, debug or trace")]
    InvalidLogLevel(String),
}

/// CLI settings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Replace invalid UTF-8 in revealed text instead of failing.
    pub lossy_text: bool,

    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Settings {
    /// Loads settings from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(&Self::config_path()?)
    }

    /// Loads settings from `path`, or returns defaults if it doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Loads settings from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses settings, rejecting a `log_level` the logger would not understand.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.log_filter()?;
        Ok(settings)
    }

    /// The configured log filter, if any.
    pub fn log_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.log_level
            .as_deref()
            .map(|level| {
                level
                    .parse()
                    .map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))
            })
            .transpose()
    }

    /// Path to the default settings file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Decoder configuration implied by these settings.
    pub fn decoder_config(&self) -> DecoderConfig {
        self.decoder_config_with(false)
    }

    /// Decoder configuration with the `--lossy` flag applied on top.
    ///
    /// The flag can only turn lossy decoding on; it never overrides a file
    /// setting of `lossy_text = true` back to strict.
    pub fn decoder_config_with(&self, lossy_flag: bool) -> DecoderConfig {
        DecoderConfig {
            utf8: if self.lossy_text || lossy_flag {
                Utf8Policy::Lossy
            } else {
                Utf8Policy::Strict
            },
        }
    }
}

/// Get the stegtext config directory (`~/.stegtext`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".stegtext"))
        .ok_or(ConfigError::NoConfigDir)
}
