//! Config management use case

use crate::error::{GymRatError, Result};
use crate::infrastructure::config::parse_photo_quality;
use crate::infrastructure::{Config, WeightUnit};
use std::path::PathBuf;
use std::str::FromStr;

/// Service for managing application configuration
pub struct ConfigService {
    data_dir: PathBuf,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(data_dir: PathBuf) -> Self {
        ConfigService { data_dir }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = Config::load_from_dir(&self.data_dir)?;

        match key {
            "photo_quality" => Ok(config.photo_quality.to_string()),
            "weight_unit" => Ok(config.weight_unit.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load_from_dir(&self.data_dir)?;

        match key {
            "photo_quality" => {
                config.photo_quality = parse_photo_quality(value)?;
            }
            "weight_unit" => {
                config.weight_unit = WeightUnit::from_str(value).map_err(GymRatError::Config)?;
            }
            _ => return Err(unknown_key(key)),
        }

        config.save_to_dir(&self.data_dir)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        Config::load_from_dir(&self.data_dir)
    }
}

fn unknown_key(key: &str) -> GymRatError {
    GymRatError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: photo_quality, weight_unit",
        key
    ))
}
