mod record;
pub use record::*;

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::types::SeederError;

/// Single-record cache file holding the bootstrap outcome.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when there is no usable record. Only an unreadable file is an
    /// error, bad contents are discarded.
    pub fn load(&self) -> Result<Option<WorkflowCacheRecord>, SeederError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: "pool_seeder::cache", path = %self.path.display(), "no cache file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        Ok(WorkflowCacheRecord::from_json(&raw))
    }

    /// Replaces the whole file: writes a sibling temp file, then renames it
    /// over the target.
    pub fn save(&self, record: &WorkflowCacheRecord) -> Result<(), SeederError> {
        let json = record.to_json()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = {
            let mut name = self.path.clone().into_os_string();
            name.push(".tmp");
            PathBuf::from(name)
        };
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        info!(target: "pool_seeder::cache", path = %self.path.display(), pool = ?record.pool_address, "saved cache record");
        Ok(())
    }
}
