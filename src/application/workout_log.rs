//! Workout logging use cases

use crate::domain::{Workout, WorkoutDate};
use crate::error::{GymRatError, Result};
use crate::infrastructure::WorkoutRepository;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Changes to apply to an existing workout; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct WorkoutEdit {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

/// Service for recording workouts, exercises and sets.
///
/// Validates user input before it reaches the repository. Positions are
/// zero-based.
pub struct WorkoutLogService {
    repository: WorkoutRepository,
}

impl WorkoutLogService {
    pub fn new(repository: WorkoutRepository) -> Self {
        WorkoutLogService { repository }
    }

    pub fn repository(&self) -> &WorkoutRepository {
        &self.repository
    }

    pub fn workouts(&self) -> &[Workout] {
        self.repository.workouts()
    }

    /// Record a new workout. Returns its position in the sorted list.
    pub fn add_workout(
        &mut self,
        name: &str,
        date: DateTime<Utc>,
        location: Option<&str>,
    ) -> Result<usize> {
        let name = required_name("Workout", name)?;
        let mut workout = Workout::new(name, date);
        if let Some(location) = location {
            workout.location = location.trim().to_string();
        }
        Ok(self.repository.add_workout(workout))
    }

    pub fn edit_workout(&mut self, index: usize, edit: WorkoutEdit) -> Result<()> {
        let name = edit
            .name
            .as_deref()
            .map(|n| required_name("Workout", n))
            .transpose()?;

        self.repository.edit_workout(index, |workout| {
            if let Some(name) = name {
                workout.name = name;
            }
            if let Some(date) = edit.date {
                workout.date = date;
            }
            if let Some(location) = edit.location {
                workout.location = location.trim().to_string();
            }
        })
    }

    /// Delete a workout along with its photo file.
    ///
    /// A photo that can't be deleted is logged and left behind; the workout
    /// is removed regardless.
    pub fn delete_workout(&mut self, index: usize) -> Result<Workout> {
        if self.repository.workout(index)?.has_photo() {
            if let Err(e) = self.repository.remove_photo(index) {
                log::warn!("Leaving orphaned photo behind: {}", e);
            }
        }
        self.repository.remove_workout(index)
    }

    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        self.repository.set_selected_index(index)
    }

    /// Add an exercise to a workout. Returns its position.
    pub fn add_exercise(&mut self, workout: usize, name: &str) -> Result<usize> {
        let name = required_name("Exercise", name)?;
        Ok(self.repository.workout_mut(workout)?.add_exercise(name))
    }

    pub fn remove_exercise(&mut self, workout: usize, exercise: usize) -> Result<()> {
        self.repository
            .workout_mut(workout)?
            .remove_exercise(exercise)
            .map(|_| ())
    }

    /// Record a set. Returns the set number assigned.
    pub fn add_set(
        &mut self,
        workout: usize,
        exercise: usize,
        weight: u32,
        repetitions: u32,
        effort: f64,
    ) -> Result<u32> {
        if !effort.is_finite() || effort < 0.0 {
            return Err(GymRatError::InvalidInput(format!(
                "Effort must be a non-negative number, got {}",
                effort
            )));
        }
        let set = self
            .repository
            .workout_mut(workout)?
            .exercise_mut(exercise)?
            .add_set(weight, repetitions, effort);
        Ok(set.number)
    }

    pub fn remove_set(&mut self, workout: usize, exercise: usize, set: usize) -> Result<()> {
        self.repository
            .workout_mut(workout)?
            .exercise_mut(exercise)?
            .remove_set(set)
            .map(|_| ())
    }

    /// Attach the image at `path` as the workout's photo
    pub fn attach_photo(&mut self, workout: usize, path: &Path) -> Result<u32> {
        self.repository.workout(workout)?;
        let bytes = fs::read(path)?;
        self.repository.save_photo(workout, &bytes)
    }

    pub fn detach_photo(&mut self, workout: usize) -> Result<()> {
        self.repository.remove_photo(workout)
    }

    /// Flush everything to disk
    pub fn persist(&self) -> Result<()> {
        self.repository.persist()
    }
}

/// Parse a date typed by the user, relative to the current time
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    Ok(WorkoutDate::parse(input)?.resolve(Utc::now()))
}

fn required_name(kind: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GymRatError::InvalidInput(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    Ok(trimmed.to_string())
}
