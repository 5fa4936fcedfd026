//! File-backed session store.
//!
//! Persists the key-value map as a single JSON file: read once at open,
//! rewritten on every mutation. Writes land in a temporary file next to the
//! target and are renamed into place, so an interrupted write leaves the
//! previous contents intact.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;

use super::SessionStore;
use crate::error::GuardResult;

/// Session store persisted to a JSON file on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, loading existing contents if the file is
    /// there. A missing file starts the store empty; a present but
    /// undecodable file is an error rather than silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> GuardResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read session store {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("session store {} is not valid JSON", path.display()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let blob = serde_json::to_string_pretty(entries)
            .context("failed to serialize session store")?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, blob)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
