//! Persisted configuration cache
//!
//! The cache file remembers the directories, compiler, generator and build
//! type of the previous run so later runs need fewer flags.

pub mod codec;

pub use codec::{decode, CacheEntry, CacheKey, CacheRecord, DecodedCache};

use crate::error::{BootstrapError, BootstrapResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Cache file name, relative to the source root
pub const CACHE_FILE_NAME: &str = ".bootstrap_cache";

/// Handle on the cache file
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    /// Cache file inside a source root
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(CACHE_FILE_NAME),
        }
    }

    /// Cache file at an explicit path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and decode the cache
    pub fn load(&self) -> BootstrapResult<DecodedCache> {
        let text = fs::read_to_string(&self.path).map_err(|e| BootstrapError::CacheUnreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let decoded = decode(&text).map_err(|reason| BootstrapError::CacheUnreadable {
            path: self.path.clone(),
            reason,
        })?;

        debug!(
            "Loaded {} cache entries from {}",
            decoded.entries.len(),
            self.path.display()
        );
        Ok(decoded)
    }

    /// Write the record, replacing any existing file
    pub fn save(&self, record: &CacheRecord) -> BootstrapResult<()> {
        fs::write(&self.path, record.encode()).map_err(|e| BootstrapError::CacheWrite {
            path: self.path.clone(),
            source: e,
        })?;

        info!("Cache saved to {}", self.path.display());
        Ok(())
    }

    /// Delete the cache file; returns false when it is still there afterwards
    pub fn remove(&self) -> bool {
        if let Err(e) = fs::remove_file(&self.path) {
            debug!("Removing {} failed: {}", self.path.display(), e);
        }
        !self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
