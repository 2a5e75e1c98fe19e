//! Error types for gymrat

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gymrat
#[derive(Debug, Error)]
pub enum GymRatError {
    #[error("No {kind} at position {index} (have {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Could not determine a data directory")]
    NoDataDirectory,

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Workout file {0} could not be read; refusing to overwrite it")]
    UnreadableWorkouts(PathBuf),

    #[error("No photo IDs left to allocate")]
    PhotoIdsExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<tempfile::PersistError> for GymRatError {
    fn from(err: tempfile::PersistError) -> Self {
        GymRatError::Io(err.error)
    }
}

impl GymRatError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GymRatError::IndexOutOfRange { .. } => 2,
            GymRatError::InvalidInput(_) | GymRatError::InvalidDate(_) => 3,
            GymRatError::NoDataDirectory | GymRatError::NotADirectory(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            GymRatError::IndexOutOfRange { kind, len, .. } => {
                if *len == 0 {
                    format!("{}\n\nThere is no {} to choose from yet.", self, kind)
                } else {
                    format!(
                        "{}\n\n\
                        Positions start at 1. Use 'gymrat list' or 'gymrat show' to see them.",
                        self
                    )
                }
            }
            GymRatError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • now, today, yesterday\n\
                    • monday, ..., sunday (most recent)\n\
                    • last monday, last friday, etc.\n\
                    • YYYY-MM-DD or YYYY-MM-DD HH:MM (UTC)\n\
                    • RFC 3339 (e.g., 2025-01-17T18:30:00Z)",
                    input
                )
            }
            GymRatError::UnreadableWorkouts(_) => {
                format!(
                    "{}\n\n\
                    Fix the file's permissions or move it out of the way, then retry.\n\
                    Nothing was saved.",
                    self
                )
            }
            GymRatError::NoDataDirectory => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Pass --data-dir <PATH>\n\
                    • Set GYMRAT_DATA_DIR environment variable",
                    self
                )
            }
            GymRatError::Config(msg) => {
                if msg.contains("photo_quality") {
                    format!(
                        "{}\n\n\
                        photo_quality is a number between 0.0 and 1.0\n\
                        Example: gymrat config photo_quality 0.5",
                        msg
                    )
                } else if msg.contains("weight_unit") {
                    format!(
                        "{}\n\n\
                        Valid units: lb, kg\n\
                        Example: gymrat config weight_unit kg",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using GymRatError
pub type Result<T> = std::result::Result<T, GymRatError>;
