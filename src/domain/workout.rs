//! Workout aggregate

use super::Exercise;
use crate::error::{GymRatError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One recorded exercise session.
///
/// A workout owns its exercises outright; edits go through index-addressed
/// methods rather than shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Empty when no location was saved
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub photo_id: Option<u32>,
}

/// File name of the photo with the given ID
pub fn photo_file_name(photo_id: u32) -> String {
    format!("Photo-{}.jpg", photo_id)
}

impl Workout {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Workout {
            name: name.into(),
            date,
            exercises: Vec::new(),
            location: String::new(),
            photo_id: None,
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo_id.is_some()
    }

    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }

    /// Path of this workout's photo inside `dir`, if it has one
    pub fn photo_path(&self, dir: &Path) -> Option<PathBuf> {
        self.photo_id.map(|id| dir.join(photo_file_name(id)))
    }

    /// Append a new, empty exercise and return its index
    pub fn add_exercise(&mut self, name: impl Into<String>) -> usize {
        self.exercises.push(Exercise::new(name));
        self.exercises.len() - 1
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<Exercise> {
        self.check_index(index)?;
        Ok(self.exercises.remove(index))
    }

    pub fn exercise(&self, index: usize) -> Result<&Exercise> {
        self.check_index(index)?;
        Ok(&self.exercises[index])
    }

    pub fn exercise_mut(&mut self, index: usize) -> Result<&mut Exercise> {
        self.check_index(index)?;
        Ok(&mut self.exercises[index])
    }

    /// Detail line shown under the workout name
    pub fn summary(&self) -> String {
        match self.exercises.len() {
            0 => "No Exercises".to_string(),
            n => format!("{} Exercises Done", n),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.exercises.len() {
            return Err(GymRatError::IndexOutOfRange {
                kind: "exercise",
                index: index + 1,
                len: self.exercises.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_new_workout() {
        let workout = Workout::new("Leg Day", sample_date());
        assert_eq!(workout.name, "Leg Day");
        assert!(workout.exercises.is_empty());
        assert!(!workout.has_location());
        assert!(!workout.has_photo());
        assert_eq!(workout.photo_path(Path::new("/data")), None);
    }

    #[test]
    fn test_has_photo_tracks_photo_id() {
        let mut workout = Workout::new("Leg Day", sample_date());
        workout.photo_id = Some(3);
        assert!(workout.has_photo());
        workout.photo_id = None;
        assert!(!workout.has_photo());
    }

    #[test]
    fn test_photo_path_is_derived_from_id() {
        let mut workout = Workout::new("Leg Day", sample_date());
        workout.photo_id = Some(12);
        assert_eq!(photo_file_name(12), "Photo-12.jpg");
        assert_eq!(
            workout.photo_path(Path::new("/data")),
            Some(PathBuf::from("/data/Photo-12.jpg"))
        );
        // Same ID, same path.
        assert_eq!(
            workout.photo_path(Path::new("/data")),
            workout.photo_path(Path::new("/data"))
        );
    }

    #[test]
    fn test_exercises_keep_append_order() {
        let mut workout = Workout::new("Push", sample_date());
        assert_eq!(workout.add_exercise("Bench"), 0);
        assert_eq!(workout.add_exercise("Dips"), 1);
        assert_eq!(workout.add_exercise("Arnold Press"), 2);

        let names: Vec<&str> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench", "Dips", "Arnold Press"]);

        workout.remove_exercise(1).unwrap();
        let names: Vec<&str> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench", "Arnold Press"]);
    }

    #[test]
    fn test_exercise_out_of_range() {
        let mut workout = Workout::new("Pull", sample_date());
        assert!(workout.exercise(0).is_err());
        assert!(workout.exercise_mut(0).is_err());
        assert!(workout.remove_exercise(0).is_err());
    }

    #[test]
    fn test_nested_edit_through_index() {
        let mut workout = Workout::new("Pull", sample_date());
        let idx = workout.add_exercise("Chin-up");
        workout.exercise_mut(idx).unwrap().add_set(0, 12, 8.0);
        assert_eq!(workout.exercise(idx).unwrap().sets.len(), 1);
        assert_eq!(workout.summary(), "1 Exercises Done");
    }

    #[test]
    fn test_json_field_names() {
        let mut workout = Workout::new("Leg Day", sample_date());
        workout.photo_id = Some(1);
        workout.location = "Main St Gym".to_string();
        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["name"], "Leg Day");
        assert_eq!(json["photoId"], 1);
        assert_eq!(json["location"], "Main St Gym");
        assert!(json["exercises"].is_array());
        assert_eq!(json["date"], "2025-03-07T18:30:00Z");
    }

    #[test]
    fn test_summary_empty() {
        let workout = Workout::new("Rest", sample_date());
        assert_eq!(workout.summary(), "No Exercises");
    }
}
