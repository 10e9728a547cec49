// Configuration for file locations and booking behaviour
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub flights_path: PathBuf,
    pub airports_path: PathBuf,
    pub reservations_path: PathBuf,
    // How many codes to draw before giving up on finding an unused one
    pub max_code_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flights_path: PathBuf::from("res/flights.csv"),
            airports_path: PathBuf::from("res/airports.csv"),
            reservations_path: PathBuf::from("res/reservations.bin"),
            max_code_attempts: 64,
        }
    }
}

impl Config {
    // Missing fields fall back to the defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_code_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_code_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
