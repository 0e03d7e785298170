//! Configuration for the HAR pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::windowing::{STEP_SIZE, WINDOW_SIZE};

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Window length in samples
    pub window_size: usize,

    /// Step between window starts in samples
    pub step_size: usize,

    /// Default training batch size
    pub batch_size: usize,

    /// Default training epochs
    pub epochs: usize,

    /// Default repetitions per (test subject, group size) pair
    pub splits: usize,

    /// Directory holding cleaned recordings
    pub clean_dir: PathBuf,

    /// Directory holding the windowed store
    pub windowed_dir: PathBuf,

    /// Directory for the group log and model report logs
    pub reports_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("har-loso-pipeline");

        Self {
            window_size: WINDOW_SIZE,
            step_size: STEP_SIZE,
            batch_size: 20,
            epochs: 50,
            splits: 10,
            clean_dir: data_dir.join("02_CLEAN"),
            windowed_dir: data_dir.join("03_WINDOWED"),
            reports_dir: data_dir.join("model-reports"),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("har-loso-pipeline")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.windowed_dir)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        std::fs::create_dir_all(&self.reports_dir)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window_size, 50);
        assert_eq!(config.step_size, 25);
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.epochs, 50);
        assert_eq!(config.splits, 10);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.window_size, config.window_size);
        assert_eq!(restored.reports_dir, config.reports_dir);
    }
}
