//! Photo files keyed by generated photo ID

use crate::domain::{photo_file_name, Workout};
use crate::error::Result;
use crate::infrastructure::fs::{remove_if_exists, write_atomic};
use image::codecs::jpeg::JpegEncoder;
use std::fs;
use std::path::PathBuf;

/// Default JPEG quality on a 0.0-1.0 scale
pub const DEFAULT_PHOTO_QUALITY: f64 = 0.5;

/// Source of fresh photo IDs. IDs handed out must never repeat.
pub trait PhotoIdAllocator {
    fn allocate_photo_id(&mut self) -> Result<u32>;
}

/// Stores one JPEG per photo-bearing workout as `Photo-<id>.jpg`.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    quality: u8,
}

impl PhotoStore {
    /// `quality` is on a 0.0-1.0 scale and is clamped into range
    pub fn new(dir: PathBuf, quality: f64) -> Self {
        PhotoStore {
            dir,
            quality: jpeg_quality(quality),
        }
    }

    /// Where the photo with this ID lives. Does not check the file exists.
    pub fn path_for(&self, photo_id: u32) -> PathBuf {
        self.dir.join(photo_file_name(photo_id))
    }

    /// Highest ID among `Photo-<id>.jpg` files in the directory, including
    /// files no workout points at any more.
    pub fn highest_stored_id(&self) -> Result<Option<u32>> {
        let mut highest = None;
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let id = name
                .to_str()
                .and_then(|n| n.strip_prefix("Photo-"))
                .and_then(|n| n.strip_suffix(".jpg"))
                .and_then(|n| n.parse::<u32>().ok());
            highest = highest.max(id);
        }
        Ok(highest)
    }

    /// Decode any supported image and re-encode it as JPEG
    pub fn encode_jpeg(&self, image_bytes: &[u8]) -> Result<Vec<u8>> {
        let rgb = image::load_from_memory(image_bytes)?.to_rgb8();
        let mut out = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
            encoder.encode_image(&rgb)?;
        }
        Ok(out)
    }

    /// Write the workout's photo, allocating an ID if it has none yet.
    ///
    /// An existing ID is kept and its file overwritten. The image is encoded
    /// before an ID is allocated so undecodable input never burns one.
    pub fn save(
        &self,
        workout: &mut Workout,
        image_bytes: &[u8],
        ids: &mut dyn PhotoIdAllocator,
    ) -> Result<u32> {
        let jpeg = self.encode_jpeg(image_bytes)?;

        let photo_id = match workout.photo_id {
            Some(id) => id,
            None => ids.allocate_photo_id()?,
        };

        write_atomic(&self.path_for(photo_id), &jpeg)?;
        workout.photo_id = Some(photo_id);

        log::debug!(
            "Saved photo {} for workout '{}' ({} bytes)",
            photo_id,
            workout.name,
            jpeg.len()
        );
        Ok(photo_id)
    }

    /// Delete the workout's photo file. Returns whether a file was removed.
    pub fn remove(&self, workout: &Workout) -> Result<bool> {
        match workout.photo_id {
            Some(id) => remove_if_exists(&self.path_for(id)),
            None => Ok(false),
        }
    }
}

fn jpeg_quality(quality: f64) -> u8 {
    let q = if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        DEFAULT_PHOTO_QUALITY
    };
    ((q * 100.0).round() as u8).max(1)
}
