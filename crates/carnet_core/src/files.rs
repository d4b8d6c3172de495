//! File helpers for image attachments and sharing.
//!
//! # Responsibility
//! - Copy externally picked files into app-private storage.
//! - Produce shareable cache copies of private files.
//!
//! # Invariants
//! - I/O failures are logged and reported as `None`; callers degrade to
//!   "no image" instead of crashing the session.

use log::error;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const IMAGES_DIR: &str = "images";
const CACHE_IMAGES_DIR: &str = "images";
const CACHE_SHARES_DIR: &str = "shares";

/// Path helper rooted at the app's private data and cache directories.
pub struct FileHelper {
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl FileHelper {
    pub fn new(data_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Copies an external file into private image storage under a fresh
    /// name. External pick/drop sources grant only transient access, so
    /// the bytes must be owned before the note references them.
    pub fn copy_to_images(&self, source: &Path) -> Option<PathBuf> {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("jpg");
        let target_dir = self.data_dir.join(IMAGES_DIR);
        let target = target_dir.join(format!("img_{}.{extension}", Uuid::new_v4()));
        copy_into(source, &target_dir, &target)
    }

    /// Writes bytes to a fresh cache file, returning its path.
    pub fn save_to_cache(&self, bytes: &[u8], extension: &str) -> Option<PathBuf> {
        let target_dir = self.cache_dir.join(CACHE_IMAGES_DIR);
        let target = target_dir.join(format!("shared_image_{}.{extension}", Uuid::new_v4()));

        let result = fs::create_dir_all(&target_dir).and_then(|()| fs::write(&target, bytes));
        match result {
            Ok(()) => Some(target),
            Err(err) => {
                error!(
                    "event=file_save module=files status=error target={} error={err}",
                    target.display()
                );
                None
            }
        }
    }

    /// Copies a private file into the share cache, keeping its name.
    pub fn shareable_copy(&self, original: &Path) -> Option<PathBuf> {
        let target_dir = self.cache_dir.join(CACHE_SHARES_DIR);
        let target = target_dir.join(original.file_name()?);
        copy_into(original, &target_dir, &target)
    }
}

fn copy_into(source: &Path, target_dir: &Path, target: &Path) -> Option<PathBuf> {
    let result = fs::create_dir_all(target_dir).and_then(|()| fs::copy(source, target));
    match result {
        Ok(_) => Some(target.to_path_buf()),
        Err(err) => {
            error!(
                "event=file_copy module=files status=error source={} error={err}",
                source.display()
            );
            None
        }
    }
}
