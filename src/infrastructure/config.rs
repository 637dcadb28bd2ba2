// src/infrastructure/config.rs
use crate::application::HistorySettings;
use crate::constants::{
    CLIPBOARD_DEBOUNCE_MS, DEFAULT_DEDUP_WINDOW_MINUTES, DEFAULT_HISTORY_LIMIT, MAX_DEDUP_WINDOW_MINUTES,
};
use crate::domain::Rule;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for clipnotes
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding one JSON file per note; empty means the default location
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClipboardConfig {
    #[serde(default = "default_true")]
    pub monitoring_enabled: bool,
    #[serde(default = "default_true")]
    pub persistence_enabled: bool,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
    #[serde(default = "default_dedup_window_minutes")]
    pub dedup_window_minutes: u64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

// Default value functions
fn default_notes_dir() -> String { String::new() }
fn default_true() -> bool { true }
fn default_history_limit() -> usize { DEFAULT_HISTORY_LIMIT }
fn default_min_text_length() -> usize { 1 }
fn default_dedup_window_minutes() -> u64 { DEFAULT_DEDUP_WINDOW_MINUTES }
fn default_debounce_ms() -> u64 { CLIPBOARD_DEBOUNCE_MS }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            monitoring_enabled: default_true(),
            persistence_enabled: default_true(),
            history_limit: default_history_limit(),
            min_text_length: default_min_text_length(),
            dedup_window_minutes: default_dedup_window_minutes(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ClipboardConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn history_settings(&self) -> HistorySettings {
        HistorySettings {
            limit: self.history_limit,
            min_text_length: self.min_text_length,
            dedup_window_minutes: self.dedup_window_minutes.min(MAX_DEDUP_WINDOW_MINUTES),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the clipboard code cannot represent
    pub fn validate(&self) -> Result<()> {
        if self.clipboard.dedup_window_minutes > MAX_DEDUP_WINDOW_MINUTES {
            bail!(
                "dedup_window_minutes must be at most {} (got {})",
                MAX_DEDUP_WINDOW_MINUTES,
                self.clipboard.dedup_window_minutes
            );
        }
        Ok(())
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(?path, "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Default config file location (`<config dir>/clipnotes/clipnotes.toml`)
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(dir.join("clipnotes").join("clipnotes.toml"))
    }

    /// Notes directory from the config, or `<documents>/clipnotes`
    pub fn notes_dir(&self) -> Result<PathBuf> {
        if !self.storage.notes_dir.is_empty() {
            return Ok(PathBuf::from(&self.storage.notes_dir));
        }
        let documents = dirs::document_dir()
            .or_else(dirs::home_dir)
            .context("Could not find documents directory")?;
        Ok(documents.join("clipnotes"))
    }
}
