//! Workout collection file

use crate::domain::Workout;
use crate::error::{GymRatError, Result};
use crate::infrastructure::fs::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the file holding every workout
pub const WORKOUTS_FILE: &str = "Workouts.json";

/// Reads and writes the whole workout list as one JSON document.
#[derive(Debug, Clone)]
pub struct WorkoutStore {
    path: PathBuf,
}

impl WorkoutStore {
    pub fn new(data_dir: &Path) -> Self {
        WorkoutStore {
            path: data_dir.join(WORKOUTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the collection. Fails on values JSON can't carry back
    /// (non-finite effort would be written as `null`).
    pub fn encode(workouts: &[Workout]) -> Result<Vec<u8>> {
        check_encodable(workouts)?;
        Ok(serde_json::to_vec_pretty(workouts)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Vec<Workout>> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load the stored workouts. `Ok(None)` means the file does not exist yet.
    pub fn load(&self) -> Result<Option<Vec<Workout>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::decode(&bytes).map(Some)
    }

    /// Replace the stored workouts with `workouts`
    pub fn save(&self, workouts: &[Workout]) -> Result<()> {
        let bytes = Self::encode(workouts)?;
        write_atomic(&self.path, &bytes)
    }
}

fn check_encodable(workouts: &[Workout]) -> Result<()> {
    for workout in workouts {
        for exercise in &workout.exercises {
            if let Some(set) = exercise.sets.iter().find(|s| !s.effort.is_finite()) {
                return Err(GymRatError::InvalidInput(format!(
                    "Effort of {} in '{}' ({}) is not a finite number",
                    set.title(),
                    exercise.name,
                    workout.name
                )));
            }
        }
    }
    Ok(())
}
