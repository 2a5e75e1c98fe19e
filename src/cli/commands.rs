//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gymrat")]
#[command(about = "Personal workout log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $GYMRAT_DATA_DIR, then the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Positions (workout, exercise, set) are 1-based as shown by `list` and `show`.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all workouts, most recent first
    List,

    /// Show a workout's exercises and sets (default: the selected workout)
    Show {
        /// Workout position
        workout: Option<usize>,
    },

    /// Record a new workout
    Add {
        /// Workout name
        name: String,

        /// When it happened (now, yesterday, friday, last monday, YYYY-MM-DD [HH:MM])
        #[arg(short, long, default_value = "now")]
        date: String,

        /// Where it happened
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Change a workout's name, date or location
    Edit {
        /// Workout position
        workout: usize,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        /// New location (empty string clears it)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Delete a workout and its photo
    Remove {
        /// Workout position
        workout: usize,
    },

    /// Select a workout, clear the selection, or show it
    Select {
        /// Workout position
        workout: Option<usize>,

        /// Clear the selection
        #[arg(long, conflicts_with = "workout")]
        clear: bool,
    },

    /// Add an exercise to a workout
    AddExercise {
        /// Workout position
        workout: usize,

        /// Exercise name
        name: String,
    },

    /// Delete an exercise from a workout
    RemoveExercise {
        /// Workout position
        workout: usize,

        /// Exercise position
        exercise: usize,
    },

    /// Record a set for an exercise
    AddSet {
        /// Workout position
        workout: usize,

        /// Exercise position
        exercise: usize,

        /// Weight lifted
        #[arg(short, long)]
        weight: u32,

        /// Repetitions performed
        #[arg(short, long)]
        reps: u32,

        /// Effort level
        #[arg(short, long, default_value_t = 0.0)]
        effort: f64,
    },

    /// Delete a set (other sets keep their numbers)
    RemoveSet {
        /// Workout position
        workout: usize,

        /// Exercise position
        exercise: usize,

        /// Set position in the list (not the set number)
        set: usize,
    },

    /// Attach a progress photo to a workout (replaces any existing one)
    Photo {
        /// Workout position
        workout: usize,

        /// Image file (JPEG or PNG)
        path: PathBuf,
    },

    /// Delete a workout's photo
    RemovePhoto {
        /// Workout position
        workout: usize,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
