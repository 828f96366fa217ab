//! Configuration management
//!
//! Startup defaults read from ~/.polysay.cfg. The file is optional and the
//! application never writes it; settings changed in the menu last only for
//! the session.

use crate::{PolysayError, Result};
use ini::Ini;
use log::debug;
use std::path::{Path, PathBuf};

/// Application configuration
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.polysay.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| PolysayError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            debug!("Config file not found, using defaults");
            Ini::new()
        };

        Ok(Self { ini, path })
    }

    /// Get config file path (~/.polysay.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".polysay.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    // Speech-specific configuration getters

    /// Startup speech rate multiplier
    pub fn rate(&self) -> f32 {
        self.get_float("speech", "rate", 1.0)
    }

    /// Startup pitch multiplier
    pub fn pitch(&self) -> f32 {
        self.get_float("speech", "pitch", 1.0)
    }

    /// Engine backend: "auto", "native" or "espeak"
    pub fn backend(&self) -> String {
        self.get_string("speech", "backend", "auto")
    }

    /// Identification confidence below which the best guess is discarded
    pub fn confidence_threshold(&self) -> f64 {
        self.get_float("identify", "confidence_threshold", 0.5) as f64
    }

    /// Cap on the fallback candidate list
    pub fn max_candidates(&self) -> usize {
        self.get_int("identify", "max_candidates", 3).max(1) as usize
    }
}
