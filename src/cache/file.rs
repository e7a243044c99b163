//! File Storage Handler
//!
//! Stores one JSON record per key in a single directory. The file name is the
//! lowercase hex SHA-256 of the key followed by `.cache`, so a key's location
//! is always recomputable and no index is kept.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::cache::entry::{CacheRecord, RecordHeader};
use crate::cache::{validate_key, StorageHandler};
use crate::config::default_cache_dir;
use crate::error::{CacheError, Result};

// == Public Constants ==
/// File extension of every record written by `FileHandler`
pub const RECORD_EXTENSION: &str = "cache";

/// Length of a hex-encoded SHA-256 digest
const DIGEST_HEX_LEN: usize = 64;

// == File Handler ==
/// Directory-backed storage handler.
#[derive(Debug, Clone)]
pub struct FileHandler {
    /// Directory where record files are stored
    cache_dir: PathBuf,
}

impl FileHandler {
    // == Constructor ==
    /// Creates a handler rooted at `cache_dir`, creating the directory if needed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let handler = Self {
            cache_dir: cache_dir.into(),
        };
        handler.ensure_dir()?;
        info!(cache_dir = ?handler.cache_dir, "File cache initialized");
        Ok(handler)
    }

    /// Creates a handler rooted at `<temp dir>/filecache`.
    pub fn in_temp_dir() -> Result<Self> {
        Self::new(default_cache_dir())
    }

    /// Returns the directory holding the records.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    // == Location Resolution ==
    /// Maps a key to its record file name.
    pub fn record_name(key: &str) -> String {
        let digest = Sha256::digest(key.as_bytes());
        format!("{}.{}", hex::encode(digest), RECORD_EXTENSION)
    }

    /// Returns the path of the record for `key`.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(Self::record_name(key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads the raw record bytes, `None` if no record exists.
    fn read_record(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a file, treating an already-missing file as success.
    fn remove_record(path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Drops the record of an expired key.
    fn expire(&self, key: &str, path: &Path) -> Result<()> {
        if Self::remove_record(path)? {
            debug!(key = %key, "Removed expired record");
        }
        Ok(())
    }
}

/// Returns true if `name` follows the `<sha256 hex>.cache` convention.
fn is_record_name(name: &str) -> bool {
    match name.strip_suffix(RECORD_EXTENSION) {
        Some(stem) => match stem.strip_suffix('.') {
            Some(digest) => {
                digest.len() == DIGEST_HEX_LEN
                    && digest
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            }
            None => false,
        },
        None => false,
    }
}

impl StorageHandler for FileHandler {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        let path = self.record_path(key);

        let Some(bytes) = Self::read_record(&path)? else {
            return Ok(None);
        };

        let record: CacheRecord = serde_json::from_slice(&bytes)
            .map_err(|source| CacheError::Decode { path: path.clone(), source })?;

        if record.is_expired() {
            self.expire(key, &path)?;
            return Ok(None);
        }

        Ok(Some(record.value))
    }

    fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<()> {
        validate_key(key)?;
        let record = CacheRecord::new(value, ttl_seconds)?;
        let bytes = serde_json::to_vec(&record)?;

        self.ensure_dir()?;

        // Write beside the target and rename over it so readers never see a torn record
        let mut tmp = NamedTempFile::new_in(&self.cache_dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.record_path(key)).map_err(|e| e.error)?;

        debug!(key = %key, size = bytes.len(), ttl_seconds, "Stored record");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        Self::remove_record(&self.record_path(key))?;
        Ok(())
    }

    fn clear(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !is_record_name(name) || !entry.file_type()?.is_file() {
                continue;
            }
            if Self::remove_record(&entry.path())? {
                removed += 1;
            }
        }

        info!(cache_dir = ?self.cache_dir, removed, "Cleared file cache");
        Ok(removed)
    }

    fn has(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let path = self.record_path(key);

        let Some(bytes) = Self::read_record(&path)? else {
            return Ok(false);
        };

        let header: RecordHeader = serde_json::from_slice(&bytes)
            .map_err(|source| CacheError::Decode { path: path.clone(), source })?;

        if header.is_expired() {
            self.expire(key, &path)?;
            return Ok(false);
        }

        Ok(true)
    }
}
