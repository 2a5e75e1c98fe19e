//! Domain layer - Workouts, exercises and sets

pub mod exercise;
pub mod set;
pub mod workout;
pub mod workout_date;

pub use exercise::Exercise;
pub use set::Set;
pub use workout::{photo_file_name, Workout};
pub use workout_date::WorkoutDate;
