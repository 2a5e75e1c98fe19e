//! Output formatting utilities

use crate::domain::Workout;
use crate::infrastructure::WeightUnit;
use chrono::{DateTime, Utc};
use std::path::Path;

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Format the workout list; the selected workout is marked with `*`
pub fn format_workout_list(workouts: &[Workout], selected: Option<usize>) -> String {
    if workouts.is_empty() {
        return "No workouts recorded".to_string();
    }

    let mut output = String::new();
    for (i, workout) in workouts.iter().enumerate() {
        let marker = if selected == Some(i) { '*' } else { ' ' };
        output.push_str(&format!(
            "{}{:>3}. {}  {}  ({})\n",
            marker,
            i + 1,
            format_date(&workout.date),
            workout.name,
            workout.summary()
        ));
    }
    output
}

/// Format one workout with all its exercises and sets
pub fn format_workout_detail(
    workout: &Workout,
    unit: WeightUnit,
    photo_path: Option<&Path>,
) -> String {
    let mut output = format!("{}\n", workout.name);
    output.push_str(&format!("Date: {} UTC\n", format_date(&workout.date)));
    if workout.has_location() {
        output.push_str(&format!("Location: {}\n", workout.location));
    }
    if let Some(path) = photo_path {
        output.push_str(&format!("Photo: {}\n", path.display()));
    }

    if workout.exercises.is_empty() {
        output.push_str("No Exercises\n");
        return output;
    }

    for (i, exercise) in workout.exercises.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {} ({})\n",
            i + 1,
            exercise.name,
            exercise.summary()
        ));
        for set in &exercise.sets {
            output.push_str(&format!(
                "       {}: {} {} x {} reps, effort {}\n",
                set.title(),
                set.weight,
                unit,
                set.repetitions,
                set.effort
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn workout(name: &str, day: u32) -> Workout {
        Workout::new(name, Utc.with_ymd_and_hms(2025, 1, day, 18, 30, 0).unwrap())
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_workout_list(&[], None), "No workouts recorded");
    }

    #[test]
    fn test_format_workout_list() {
        let mut arms = workout("Arm Day", 17);
        arms.add_exercise("Curl");
        let workouts = vec![arms, workout("Leg Day", 16)];

        let output = format_workout_list(&workouts, Some(1));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "   1. 2025-01-17 18:30  Arm Day  (1 Exercises Done)");
        assert_eq!(lines[1], "*  2. 2025-01-16 18:30  Leg Day  (No Exercises)");
    }

    #[test]
    fn test_format_detail_empty() {
        let output = format_workout_detail(&workout("Rest", 3), WeightUnit::Lb, None);
        assert!(output.starts_with("Rest\nDate: 2025-01-03 18:30 UTC\n"));
        assert!(output.contains("No Exercises"));
        assert!(!output.contains("Location"));
        assert!(!output.contains("Photo"));
    }

    #[test]
    fn test_format_detail_with_sets() {
        let mut w = workout("Leg Day", 3);
        w.location = "Iron Gym".to_string();
        let squat = w.add_exercise("Squat");
        let exercise = w.exercise_mut(squat).unwrap();
        exercise.add_set(100, 5, 7.5);
        exercise.add_set(110, 5, 8.0);
        exercise.remove_set(0).unwrap();
        let photo = PathBuf::from("/data/Photo-2.jpg");

        let output = format_workout_detail(&w, WeightUnit::Kg, Some(&photo));

        assert!(output.contains("Location: Iron Gym"));
        assert!(output.contains("Photo: /data/Photo-2.jpg"));
        assert!(output.contains("  1. Squat (1 Sets Done)"));
        assert!(output.contains("Set 2: 110 kg x 5 reps, effort 8"));
        assert!(!output.contains("Set 1"));
    }
}
