//! Configuration management
//!
//! Startup defaults for the pad (rate, pitch, preferred voice) live in an
//! INI file at ~/.speakpad.cfg. The settings menu writes changed values
//! back; nothing about a playback session is ever persisted.

use crate::{Result, SpeakpadError};
use crate::speech::clamp_param;
use ini::Ini;
use log::{debug, info};
use std::path::PathBuf;

/// Application configuration
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.speakpad.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating defaults when the
    /// file does not exist
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SpeakpadError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| SpeakpadError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| SpeakpadError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.speakpad.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".speakpad.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("rate", "1.0")
            .set("pitch", "1.0")
            .set("voice", "");

        ini
    }

    fn speech_value(&self, key: &str) -> Option<&str> {
        self.ini.section(Some("speech")).and_then(|s| s.get(key))
    }

    /// Startup rate multiplier, clamped to the supported range
    pub fn rate(&self) -> f32 {
        self.speech_value("rate")
            .and_then(|v| v.parse::<f32>().ok())
            .map(clamp_param)
            .unwrap_or(1.0)
    }

    /// Startup pitch multiplier, clamped to the supported range
    pub fn pitch(&self) -> f32 {
        self.speech_value("pitch")
            .and_then(|v| v.parse::<f32>().ok())
            .map(clamp_param)
            .unwrap_or(1.0)
    }

    /// Preferred voice name; an empty value means no preference
    pub fn voice(&self) -> Option<String> {
        self.speech_value("voice")
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    /// Set a value in the config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }
}
