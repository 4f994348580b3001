//! Cache Store Module
//!
//! Reads and publishes rendered images under a cache directory. Entries are
//! published by writing a temporary file in the same directory and renaming
//! it over the final name, so concurrent readers see either the previous
//! file or the complete new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{CacheKey, CACHE_FILE_EXTENSION};
use crate::error::CacheWriteError;

/// Whether a file last modified at `modified` is still valid at `now`.
///
/// Valid iff its age is strictly below `ttl`. A modification time in the
/// future counts as age zero.
pub fn is_fresh(modified: SystemTime, now: SystemTime, ttl: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age < ttl,
        Err(_) => !ttl.is_zero(),
    }
}

// == Image Cache ==
/// Directory-backed cache of encoded images.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ImageCache {
    // == Constructor ==
    /// Creates a cache rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Final path of the entry for `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    // == Get ==
    /// Returns the cached bytes if the entry exists and is fresh.
    ///
    /// Missing, expired and unreadable entries are all reported as `None`.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        self.get_at(key, SystemTime::now())
    }

    /// Same as [`get`](Self::get), evaluated at an explicit instant.
    pub fn get_at(&self, key: &CacheKey, now: SystemTime) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        let modified = fs::metadata(&path).and_then(|meta| meta.modified()).ok()?;
        if !is_fresh(modified, now, self.ttl) {
            debug!(path = %path.display(), "cache entry expired");
            return None;
        }
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable cache entry");
                None
            }
        }
    }

    // == Put ==
    /// Publishes `bytes` as the entry for `key`, replacing any previous one.
    ///
    /// The write time becomes the entry's freshness timestamp.
    pub fn put(&self, key: &CacheKey, bytes: &[u8]) -> Result<PathBuf, CacheWriteError> {
        fs::create_dir_all(&self.dir).map_err(|source| CacheWriteError::CreateDir {
            path: self.dir.display().to_string(),
            source,
        })?;

        let path = self.path_for(key);
        let write_err = |source| CacheWriteError::Write {
            path: path.display().to_string(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(bytes).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        // A failed persist drops the temp file, which removes it
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        Ok(path)
    }

    // == Cleanup Expired ==
    /// Removes every expired entry from the cache directory.
    ///
    /// Returns the number of files removed. Temporary files and foreign
    /// files are left alone.
    pub fn cleanup_expired(&self) -> usize {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cannot scan cache directory");
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CACHE_FILE_EXTENSION) {
                continue;
            }
            let Ok(modified) = entry.metadata().and_then(|meta| meta.modified()) else {
                continue;
            };
            if is_fresh(modified, now, self.ttl) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "cannot remove expired entry"),
            }
        }
        removed
    }
}
