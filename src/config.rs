//! Configuration file support
//!
//! Loads settings from ~/.notelight.toml (or %USERPROFILE%\.notelight.toml on Windows)
//!
//! Example:
//! ```toml
//! # notelight configuration
//! highlighting = true
//! live-spell-check = true
//! spell-ignore-numbers = false
//! spell-ignore-uppercase = true
//! dictionary = "/usr/share/dict/words"
//! rules = "/home/me/.notelight-rules.toml"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HighlightError, Result};
use crate::spelling::TokenizerOptions;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Whether markdown/HTML highlighting is enabled
    pub highlighting: bool,
    /// Whether lines are spell-checked as they are highlighted
    pub live_spell_check: bool,
    /// Skip words containing digits
    pub spell_ignore_numbers: bool,
    /// Skip words without lowercase letters
    pub spell_ignore_uppercase: bool,
    /// Word list used for spell-checking
    pub dictionary: Option<PathBuf>,
    /// Custom TOML rule table replacing the built-in one
    pub rules: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlighting: true,
            live_spell_check: true,
            spell_ignore_numbers: false,
            spell_ignore_uppercase: true,
            dictionary: None,
            rules: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".notelight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".notelight.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing or malformed file yields the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::debug!("No home directory available, using default config");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(HighlightError::Config)
    }

    /// Word filters for the spell-check tokenizer
    pub fn tokenizer_options(&self) -> TokenizerOptions {
        TokenizerOptions {
            skip_numeric: self.spell_ignore_numbers,
            skip_uppercase: self.spell_ignore_uppercase,
        }
    }
}
