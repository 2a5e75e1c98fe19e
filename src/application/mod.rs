//! Application layer - Use cases and orchestration

pub mod manage_config;
pub mod workout_log;

pub use manage_config::ConfigService;
pub use workout_log::{parse_date, WorkoutEdit, WorkoutLogService};
