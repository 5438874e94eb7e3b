use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils;

/// Application configuration module
/// This module handles loading, validating and saving the settings used by the
/// command-line front end.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Target language identifier (e.g. "hindi")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Glossary settings
    #[serde(default)]
    pub glossary: GlossaryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Glossary settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlossaryConfig {
    /// Path of the glossary resource
    #[serde(default = "default_glossary_path")]
    pub path: String,

    /// Whether term protection runs around translation
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            path: default_glossary_path(),
            enabled: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "hindi".to_string()
}

fn default_glossary_path() -> String {
    "resources/defense_glossary.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration, writing a default file first if none exists
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        if self.glossary.enabled && self.glossary.path.trim().is_empty() {
            return Err(anyhow!("Glossary path is required when protection is enabled"));
        }

        // Unknown languages still work through the prefix fallback
        if !language_utils::is_known_language(&self.target_language) {
            warn!(
                "Target language '{}' is not in the language table, using field '{}'",
                self.target_language,
                language_utils::target_field(&self.target_language)
            );
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            glossary: GlossaryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
