//! Workout repository: the single gateway to durable storage

use crate::domain::Workout;
use crate::error::{GymRatError, Result};
use crate::infrastructure::fs::set_aside;
use crate::infrastructure::settings::NO_SELECTION;
use crate::infrastructure::{Config, PhotoStore, SettingsStore, WorkoutStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of reading the workout file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No file yet; the collection starts empty
    Missing,
    /// File read and decoded with this many workouts
    Loaded(usize),
    /// File exists but could not be read or decoded; the collection is empty
    Corrupt(String),
}

/// Owns the workout list, the scalar settings and the photo store.
///
/// Mutations happen in memory; nothing reaches disk until [`persist`],
/// except the selected index and photo counter, which write through.
/// Saving is refused while a workout file that could not be read is still
/// in place.
///
/// [`persist`]: WorkoutRepository::persist
#[derive(Debug)]
pub struct WorkoutRepository {
    data_dir: PathBuf,
    workouts: Vec<Workout>,
    store: WorkoutStore,
    settings: SettingsStore,
    photos: PhotoStore,
    last_load: LoadStatus,
    writable: bool,
}

impl WorkoutRepository {
    /// Open the repository in `data_dir`, reading `config.toml` for photo settings
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from_dir(&data_dir).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config: {}", e);
            Config::default()
        });
        Self::open_with_config(data_dir, &config)
    }

    /// Open the repository, creating the data directory if needed.
    ///
    /// Loads the workout file, flips the first-launch flag, and never fails
    /// because of bad persisted data.
    pub fn open_with_config(data_dir: PathBuf, config: &Config) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;

        let mut repo = WorkoutRepository {
            store: WorkoutStore::new(&data_dir),
            settings: SettingsStore::open(data_dir.clone()),
            photos: PhotoStore::new(data_dir.clone(), config.photo_quality),
            workouts: Vec::new(),
            last_load: LoadStatus::Missing,
            writable: true,
            data_dir,
        };

        repo.load();

        match repo.settings.take_first_launch() {
            Ok(true) => log::info!("First launch in {}", repo.data_dir.display()),
            Ok(false) => {}
            Err(e) => log::error!("Failed to record first launch: {}", e),
        }

        Ok(repo)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read the workout file, replacing the in-memory collection.
    ///
    /// Never fails: a corrupt file leaves the collection empty and is
    /// reported through the returned status. An undecodable file is moved
    /// aside; a file that can't be read at all stays put and blocks saving.
    pub fn load(&mut self) -> LoadStatus {
        let status = match self.store.load() {
            Ok(Some(workouts)) => {
                log::debug!(
                    "Loaded {} workouts from {}",
                    workouts.len(),
                    self.store.path().display()
                );
                let count = workouts.len();
                self.workouts = workouts;
                self.writable = true;
                LoadStatus::Loaded(count)
            }
            Ok(None) => {
                log::debug!("No workout file at {}", self.store.path().display());
                self.workouts.clear();
                self.writable = true;
                LoadStatus::Missing
            }
            Err(e) => {
                log::warn!(
                    "Failed to load workouts from {}: {}",
                    self.store.path().display(),
                    e
                );
                self.writable = matches!(e, GymRatError::Json(_))
                    && match set_aside(self.store.path()) {
                        Ok(_) => true,
                        Err(e) => {
                            log::error!("Failed to set aside unreadable workout file: {}", e);
                            false
                        }
                    };
                if !self.writable {
                    log::warn!(
                        "Saving disabled until {} can be read",
                        self.store.path().display()
                    );
                }
                self.workouts.clear();
                LoadStatus::Corrupt(e.to_string())
            }
        };

        let on_disk = self.photos.highest_stored_id().unwrap_or_else(|e| {
            log::warn!("Failed to scan photo files: {}", e);
            None
        });
        let highest = self
            .workouts
            .iter()
            .filter_map(|w| w.photo_id)
            .max()
            .max(on_disk);
        if let Some(highest) = highest {
            self.settings.raise_photo_counter(highest);
        }

        self.last_load = status.clone();
        status
    }

    /// Status of the most recent load
    pub fn last_load_status(&self) -> &LoadStatus {
        &self.last_load
    }

    /// Write the workout collection atomically
    pub fn save(&self) -> Result<()> {
        if !self.writable {
            log::error!(
                "Not saving over unreadable workout file {}",
                self.store.path().display()
            );
            return Err(GymRatError::UnreadableWorkouts(self.store.path().to_path_buf()));
        }
        self.store.save(&self.workouts).map_err(|e| {
            log::error!(
                "Failed to save workouts to {}: {}",
                self.store.path().display(),
                e
            );
            e
        })
    }

    /// Flush the workout collection and the settings
    pub fn persist(&self) -> Result<()> {
        self.save()?;
        self.settings.persist().map_err(|e| {
            log::error!("Failed to save settings: {}", e);
            e
        })
    }

    /// Discard in-memory state and re-read everything from disk
    pub fn reload(&mut self) -> LoadStatus {
        self.settings.reload();
        self.load()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn workout(&self, index: usize) -> Result<&Workout> {
        self.check_index(index)?;
        Ok(&self.workouts[index])
    }

    /// Mutable access without re-sorting. Use [`edit_workout`] when the
    /// date may change.
    ///
    /// [`edit_workout`]: WorkoutRepository::edit_workout
    pub fn workout_mut(&mut self, index: usize) -> Result<&mut Workout> {
        self.check_index(index)?;
        Ok(&mut self.workouts[index])
    }

    /// Add a workout and re-sort. Returns its position after sorting.
    pub fn add_workout(&mut self, workout: Workout) -> usize {
        let date = workout.date;
        self.workouts.push(workout);
        self.sort_workouts();
        // Stable sort keeps the new workout last among equal dates.
        self.workouts
            .iter()
            .rposition(|w| w.date == date)
            .unwrap_or(self.workouts.len() - 1)
    }

    /// Remove the workout at `index`.
    ///
    /// The selected index is cleared if it pointed at the removed workout
    /// and shifted down if it pointed past it. The photo file is left alone.
    pub fn remove_workout(&mut self, index: usize) -> Result<Workout> {
        self.check_index(index)?;
        let removed = self.workouts.remove(index);

        let selected = self.settings.selected_index();
        let adjusted = match selected {
            NO_SELECTION => NO_SELECTION,
            s if s == index as i64 => NO_SELECTION,
            s if s > index as i64 => s - 1,
            s => s,
        };
        if adjusted != selected {
            if let Err(e) = self.settings.set_selected_index(adjusted) {
                log::error!("Failed to update selected workout: {}", e);
            }
        }

        Ok(removed)
    }

    /// Apply `edit` to the workout at `index`, then re-sort.
    pub fn edit_workout<F, R>(&mut self, index: usize, edit: F) -> Result<R>
    where
        F: FnOnce(&mut Workout) -> R,
    {
        self.check_index(index)?;
        let result = edit(&mut self.workouts[index]);
        self.sort_workouts();
        Ok(result)
    }

    /// Stable sort, most recent first
    pub fn sort_workouts(&mut self) {
        self.workouts.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// The selected workout's index, if any and still in range
    pub fn selected_index(&self) -> Option<usize> {
        let raw = self.settings.selected_index();
        if raw < 0 {
            return None;
        }
        let index = raw as usize;
        (index < self.workouts.len()).then_some(index)
    }

    /// Select a workout (or none). Written to disk immediately.
    pub fn set_selected_index(&mut self, index: Option<usize>) -> Result<()> {
        let raw = match index {
            Some(i) => {
                self.check_index(i)?;
                i as i64
            }
            None => NO_SELECTION,
        };
        self.settings.set_selected_index(raw).map_err(|e| {
            log::error!("Failed to save selected workout: {}", e);
            e
        })
    }

    pub fn selected_workout(&self) -> Option<&Workout> {
        self.selected_index().map(|i| &self.workouts[i])
    }

    /// Last photo ID handed out (0 when none yet)
    pub fn last_photo_id(&self) -> u32 {
        self.settings.next_photo_id()
    }

    /// Path of the workout's photo, if it has one
    pub fn photo_path(&self, index: usize) -> Result<Option<PathBuf>> {
        Ok(self
            .workout(index)?
            .photo_id
            .map(|id| self.photos.path_for(id)))
    }

    /// Store a photo for the workout at `index`, returning its photo ID
    pub fn save_photo(&mut self, index: usize, image_bytes: &[u8]) -> Result<u32> {
        self.check_index(index)?;
        let workout = &mut self.workouts[index];
        self.photos
            .save(workout, image_bytes, &mut self.settings)
            .map_err(|e| {
                log::error!("Failed to save photo for '{}': {}", workout.name, e);
                e
            })
    }

    /// Delete the workout's photo file and clear its photo ID.
    ///
    /// The ID stays set if the file could not be deleted.
    pub fn remove_photo(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let workout = &mut self.workouts[index];
        if let Err(e) = self.photos.remove(workout) {
            log::error!("Failed to remove photo for '{}': {}", workout.name, e);
            return Err(e);
        }
        workout.photo_id = None;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.workouts.len() {
            return Err(GymRatError::IndexOutOfRange {
                kind: "workout",
                index: index + 1,
                len: self.workouts.len(),
            });
        }
        Ok(())
    }
}
