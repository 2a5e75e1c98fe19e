//! Atomic file replacement

use crate::error::Result;
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Replace `path` with `contents` all-or-nothing.
///
/// The bytes go to a temp file in the destination directory, are synced, and
/// the temp file is renamed over `path`. Readers see either the old file or
/// the new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Remove a file, treating "already gone" as success.
///
/// Returns whether a file was actually deleted.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Rename an unreadable file to `<name>.corrupt-<timestamp>` next to it.
///
/// Returns the new path.
pub fn set_aside(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup = path.with_file_name(format!(
        "{}.corrupt-{}",
        name,
        Utc::now().format("%Y%m%d%H%M%S")
    ));
    fs::rename(path, &backup)?;
    log::warn!("Moved unreadable {} to {}", name, backup.display());
    Ok(backup)
}
