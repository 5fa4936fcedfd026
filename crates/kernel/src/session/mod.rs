//! Session cache: the locally persisted marker of a verified login.
//!
//! The marker lives in an injected key-value store under a single fixed key
//! and is written only by the guard after a successful remote verification.
//! All reads and writes go through [`SessionStore`], so swapping backends
//! never changes call sites.
//!
//! Two access levels exist on purpose. Authorization checks only that a
//! non-empty value is present under the key; [`load_session`] additionally
//! decodes the identity fields for display and audit. A marker that is
//! present but does not decode still authorizes: the store is a latency
//! optimization, not the source of truth.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GuardResult;

/// Identity fields captured from a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    pub role: String,
    pub user_id: String,
}

/// Key-value store holding the session marker.
///
/// Synchronous on purpose: the remote verification call is the only
/// suspension point in the navigation path, and the store must not add
/// another. Backends that need I/O (the file store) do it inline.
pub trait SessionStore: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Clear the value stored under `key`. Clearing a missing key is a
    /// no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Decode the typed session record stored under `key`.
///
/// Returns `None` when the store holds nothing, the value is empty, the
/// value does not decode, or the read itself fails. Failures are logged at
/// debug level; callers needing the distinction should use
/// [`SessionStore::get`] directly.
pub fn load_session(store: &dyn SessionStore, key: &str) -> Option<SessionRecord> {
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(e) => {
            debug!(error = %e, "session store read failed");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(error = %e, "cached session marker did not decode");
            None
        }
    }
}

/// Serialize `record` into the store under `key`, replacing any prior
/// value.
pub fn store_session(
    store: &dyn SessionStore,
    key: &str,
    record: &SessionRecord,
) -> GuardResult<()> {
    let blob =
        serde_json::to_string(record).context("failed to serialize session record")?;
    store.set(key, &blob)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            username: "ada".to_string(),
            role: "admin".to_string(),
            user_id: "7".to_string(),
        }
    }

    #[test]
    fn store_then_load_round_trips() {
        let store = MemoryStore::new();
        store_session(&store, "userInfo", &record()).unwrap();

        let loaded = load_session(&store, "userInfo").unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(load_session(&store, "userInfo").is_none());
    }

    #[test]
    fn load_tolerates_garbage() {
        let store = MemoryStore::new();
        store.set("userInfo", "not a record").unwrap();
        assert!(load_session(&store, "userInfo").is_none());
    }

    #[test]
    fn load_treats_empty_value_as_absent() {
        let store = MemoryStore::new();
        store.set("userInfo", "").unwrap();
        assert!(load_session(&store, "userInfo").is_none());
    }
}
