use std::default::Default;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Speech detection config
    #[serde(default)]
    pub speech_detection: SpeechDetectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech detection tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechDetectionConfig {
    /// Whether to run voice-activity detection at all; when off, every cue
    /// schedules on its own timing
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Noise tolerance for ffmpeg silencedetect, e.g. "-30dB"
    #[serde(default = "default_noise_threshold")]
    pub noise_threshold: String,

    /// Minimum silence length in seconds before a gap counts as silence
    #[serde(default = "default_min_silence_secs")]
    pub min_silence_secs: f64,
}

fn default_true() -> bool {
    true
}

fn default_noise_threshold() -> String {
    "-30dB".to_string()
}

fn default_min_silence_secs() -> f64 {
    0.4
}

impl Default for SpeechDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            noise_threshold: default_noise_threshold(),
            min_silence_secs: default_min_silence_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            speech_detection: SpeechDetectionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, creating a default one if the
    /// file does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.is_empty() {
            return Err(anyhow!("Source language cannot be empty"));
        }
        if self.target_language.is_empty() {
            return Err(anyhow!("Target language cannot be empty"));
        }
        if !self.speech_detection.min_silence_secs.is_finite()
            || self.speech_detection.min_silence_secs <= 0.0
        {
            return Err(anyhow!(
                "Minimum silence duration must be a positive number of seconds, got {}",
                self.speech_detection.min_silence_secs
            ));
        }
        Ok(())
    }
}
