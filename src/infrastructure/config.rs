//! Configuration management

use crate::error::{GymRatError, Result};
use crate::infrastructure::fs::write_atomic;
use crate::infrastructure::photo_store::DEFAULT_PHOTO_QUALITY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "GYMRAT_DATA_DIR";

/// Unit used when displaying weights. Stored weights are unitless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lb,
    Kg,
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            _ => Err(format!("Invalid weight_unit: '{}'", s)),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lb => write!(f, "lb"),
            WeightUnit::Kg => write!(f, "kg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JPEG quality for saved photos, 0.0 to 1.0
    pub photo_quality: f64,
    pub weight_unit: WeightUnit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            photo_quality: DEFAULT_PHOTO_QUALITY,
            weight_unit: WeightUnit::default(),
        }
    }
}

impl Config {
    /// Load config from config.toml in the given directory.
    /// A missing file means defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(GymRatError::Io(e)),
        };

        let config: Config = toml::from_str(&contents)
            .map_err(|e| GymRatError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| GymRatError::Config(format!("Failed to serialize config: {}", e)))?;

        write_atomic(&path.join(CONFIG_FILE), contents.as_bytes())
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.photo_quality) {
            return Err(GymRatError::Config(format!(
                "Invalid photo_quality: '{}'",
                self.photo_quality
            )));
        }
        Ok(())
    }
}

/// Parse a photo quality value, rejecting anything outside 0.0-1.0
pub fn parse_photo_quality(value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(q) if (0.0..=1.0).contains(&q) => Ok(q),
        _ => Err(GymRatError::Config(format!(
            "Invalid photo_quality: '{}'",
            value
        ))),
    }
}

/// Resolve the data directory.
///
/// Order: explicit path, then `GYMRAT_DATA_DIR`, then the platform data
/// directory joined with `gymrat`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let dir = if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        PathBuf::from(path)
    } else {
        dirs::data_dir()
            .map(|d| d.join("gymrat"))
            .ok_or(GymRatError::NoDataDirectory)?
    };

    if dir.exists() && !dir.is_dir() {
        return Err(GymRatError::NotADirectory(dir));
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.photo_quality, 0.5);
        assert_eq!(config.weight_unit, WeightUnit::Lb);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            photo_quality: 0.8,
            weight_unit: WeightUnit::Kg,
        };

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(CONFIG_FILE).exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_invalid_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "weight_unit = \"stone\"\n").unwrap();

        match Config::load_from_dir(temp.path()) {
            Err(GymRatError::Config(msg)) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_out_of_range_quality() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "photo_quality = 4.0\n").unwrap();

        assert!(Config::load_from_dir(temp.path()).is_err());
    }

    #[test]
    fn test_weight_unit_parse_and_display() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("LBS".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert!("stone".parse::<WeightUnit>().is_err());
        assert_eq!(WeightUnit::Kg.to_string(), "kg");
    }

    #[test]
    fn test_parse_photo_quality() {
        assert_eq!(parse_photo_quality("0.75").unwrap(), 0.75);
        assert!(parse_photo_quality("1.5").is_err());
        assert!(parse_photo_quality("-0.1").is_err());
        assert!(parse_photo_quality("high").is_err());
    }

    #[test]
    fn test_resolve_explicit_wins() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(DATA_DIR_ENV);

        let temp = TempDir::new().unwrap();
        std::env::set_var(DATA_DIR_ENV, "/somewhere/else");

        let dir = resolve_data_dir(Some(temp.path())).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn test_resolve_from_env() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(DATA_DIR_ENV);

        let temp = TempDir::new().unwrap();
        std::env::set_var(DATA_DIR_ENV, temp.path());

        let dir = resolve_data_dir(None).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn test_resolve_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        match resolve_data_dir(Some(&file)) {
            Err(GymRatError::NotADirectory(p)) => assert_eq!(p, file),
            other => panic!("Expected NotADirectory, got {:?}", other),
        }
    }
}
