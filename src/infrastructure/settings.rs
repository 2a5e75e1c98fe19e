//! Small scalar settings persisted next to the workout file

use crate::error::{GymRatError, Result};
use crate::infrastructure::fs::{set_aside, write_atomic};
use crate::infrastructure::photo_store::PhotoIdAllocator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the settings file inside the data directory
pub const SETTINGS_FILE: &str = "Settings.toml";

/// Value stored for "no workout selected"
pub const NO_SELECTION: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub selected_index: i64,
    pub first_launch: bool,
    pub next_photo_id: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            selected_index: NO_SELECTION,
            first_launch: true,
            next_photo_id: 0,
        }
    }
}

impl Settings {
    /// Load from `Settings.toml` in `dir`; a missing file yields defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&contents)?)
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        write_atomic(&dir.join(SETTINGS_FILE), contents.as_bytes())
    }
}

/// Settings bound to their file. Every setter writes through immediately.
#[derive(Debug)]
pub struct SettingsStore {
    dir: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Open the store, falling back to defaults when the file can't be read.
    /// An unreadable file is moved aside first so it is never overwritten.
    pub fn open(dir: PathBuf) -> Self {
        let settings = Self::read_or_default(&dir);
        SettingsStore { dir, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selected_index(&self) -> i64 {
        self.settings.selected_index
    }

    pub fn set_selected_index(&mut self, index: i64) -> Result<()> {
        self.settings.selected_index = index;
        self.persist()
    }

    pub fn next_photo_id(&self) -> u32 {
        self.settings.next_photo_id
    }

    /// Flip the first-launch flag if it is still set.
    ///
    /// Returns true only on the very first call ever for this directory.
    pub fn take_first_launch(&mut self) -> Result<bool> {
        if !self.settings.first_launch {
            return Ok(false);
        }
        self.settings.first_launch = false;
        self.persist()?;
        Ok(true)
    }

    /// Raise the photo counter so it is at least `floor`. In memory only.
    pub fn raise_photo_counter(&mut self, floor: u32) {
        if self.settings.next_photo_id < floor {
            log::warn!(
                "Photo counter {} is behind stored photo ID {}, raising it",
                self.settings.next_photo_id,
                floor
            );
            self.settings.next_photo_id = floor;
        }
    }

    pub fn persist(&self) -> Result<()> {
        self.settings.save_to_dir(&self.dir)
    }

    /// Re-read the file, discarding in-memory values
    pub fn reload(&mut self) {
        self.settings = Self::read_or_default(&self.dir);
    }

    fn read_or_default(dir: &Path) -> Settings {
        match Settings::load_from_dir(dir) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to read {}: {}; using defaults", SETTINGS_FILE, e);
                if let Err(e) = set_aside(&dir.join(SETTINGS_FILE)) {
                    log::error!("Failed to set aside {}: {}", SETTINGS_FILE, e);
                }
                Settings::default()
            }
        }
    }
}

impl PhotoIdAllocator for SettingsStore {
    fn allocate_photo_id(&mut self) -> Result<u32> {
        let id = self
            .settings
            .next_photo_id
            .checked_add(1)
            .ok_or(GymRatError::PhotoIdsExhausted)?;
        self.settings.next_photo_id = id;
        self.persist()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.selected_index, -1);
        assert!(settings.first_launch);
        assert_eq!(settings.next_photo_id, 0);
    }

    #[test]
    fn test_load_missing_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            Settings::load_from_dir(temp.path()).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "next_photo_id = 9\n").unwrap();

        let settings = Settings::load_from_dir(temp.path()).unwrap();
        assert_eq!(settings.next_photo_id, 9);
        assert_eq!(settings.selected_index, -1);
        assert!(settings.first_launch);
    }

    #[test]
    fn test_set_selected_index_persists_immediately() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().to_path_buf());

        store.set_selected_index(3).unwrap();

        let on_disk = Settings::load_from_dir(temp.path()).unwrap();
        assert_eq!(on_disk.selected_index, 3);
    }

    #[test]
    fn test_take_first_launch_once() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().to_path_buf());

        assert!(store.take_first_launch().unwrap());
        assert!(!store.take_first_launch().unwrap());

        let mut reopened = SettingsStore::open(temp.path().to_path_buf());
        assert!(!reopened.take_first_launch().unwrap());
    }

    #[test]
    fn test_allocate_photo_id_is_monotonic_and_durable() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().to_path_buf());

        assert_eq!(store.allocate_photo_id().unwrap(), 1);
        assert_eq!(store.allocate_photo_id().unwrap(), 2);

        let mut reopened = SettingsStore::open(temp.path().to_path_buf());
        assert_eq!(reopened.next_photo_id(), 2);
        assert_eq!(reopened.allocate_photo_id().unwrap(), 3);
    }

    #[test]
    fn test_raise_photo_counter_never_lowers() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().to_path_buf());
        store.raise_photo_counter(5);
        assert_eq!(store.next_photo_id(), 5);
        store.raise_photo_counter(2);
        assert_eq!(store.next_photo_id(), 5);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "selected_index = [oops").unwrap();

        let mut store = SettingsStore::open(temp.path().to_path_buf());
        assert_eq!(store.settings(), &Settings::default());

        let backups: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_string_lossy()
                    .starts_with("Settings.toml.corrupt-")
            })
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            fs::read_to_string(backups[0].path()).unwrap(),
            "selected_index = [oops"
        );

        // Writing fresh settings leaves the backup alone.
        store.take_first_launch().unwrap();
        assert_eq!(
            fs::read_to_string(backups[0].path()).unwrap(),
            "selected_index = [oops"
        );
    }

    #[test]
    fn test_allocate_photo_id_when_exhausted() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE),
            format!("next_photo_id = {}\n", u32::MAX),
        )
        .unwrap();
        let mut store = SettingsStore::open(temp.path().to_path_buf());

        assert!(matches!(
            store.allocate_photo_id(),
            Err(GymRatError::PhotoIdsExhausted)
        ));
        assert_eq!(store.next_photo_id(), u32::MAX);
    }

    #[test]
    fn test_reload_discards_memory() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().to_path_buf());
        store.set_selected_index(1).unwrap();
        store.raise_photo_counter(10);

        store.reload();

        assert_eq!(store.selected_index(), 1);
        assert_eq!(store.next_photo_id(), 0);
    }
}
