//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod fs;
pub mod photo_store;
pub mod repository;
pub mod settings;
pub mod store;

pub use config::{resolve_data_dir, Config, WeightUnit};
pub use photo_store::{PhotoIdAllocator, PhotoStore};
pub use repository::{LoadStatus, WorkoutRepository};
pub use settings::{Settings, SettingsStore};
pub use store::WorkoutStore;
