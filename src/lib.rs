//! gymrat - Personal workout log
//!
//! Records workouts, the exercises performed in them and the sets of each
//! exercise, with an optional progress photo per workout. Everything lives in
//! a single data directory: one JSON file for the workouts, a small settings
//! file, and one JPEG per photo.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::GymRatError;
