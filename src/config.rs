//! Application configuration.
//!
//! A JSON file holding the initial fretboards plus audio, MIDI and window
//! settings. Every section and field is optional. The file path comes from
//! the first command line argument or the `FRETBOARD_CONFIG` variable.
//! The file is only read: fretboards live as long as the window.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fretboard::MultitoolOptions;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FRETBOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    pub enabled: bool,
    /// Master volume, 0.0 to 1.0.
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MidiConfig {
    /// Substring of the output port name. No port is opened when absent.
    pub output_port: Option<String>,
    /// Zero-based MIDI channel.
    pub channel: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Initial fretboards, top to bottom.
    pub tools: Vec<MultitoolOptions>,
    pub audio: AudioConfig,
    pub midi: MidiConfig,
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tools: vec![MultitoolOptions::default()],
            audio: AudioConfig::default(),
            midi: MidiConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "audio.volume must be within 0..1, got {}",
                self.audio.volume
            )));
        }
        if self.midi.channel > 15 {
            return Err(ConfigError::Invalid(format!(
                "midi.channel must be within 0..15, got {}",
                self.midi.channel
            )));
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::Invalid("window size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        if config.tools.is_empty() {
            config.tools.push(MultitoolOptions::default());
        }
        Ok(config)
    }
}

/// Config path from the command line, then the environment.
pub fn config_path(args: impl IntoIterator<Item = String>) -> Option<PathBuf> {
    args.into_iter()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    AppConfig::from_json(&json)
}

/// Load `path`, falling back to defaults when it is absent or unusable.
pub fn load_or_default(path: Option<&Path>) -> AppConfig {
    let Some(path) = path else {
        return AppConfig::default();
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return AppConfig::default();
    }
    match load_from_file(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), tools = config.tools.len(), "config loaded");
            config
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "{}; using defaults", err);
            AppConfig::default()
        }
    }
}
