//! Wicket test utilities.
//!
//! Instrumented session stores, a scripted verifier, and route fixtures
//! shared by the kernel's integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Barrier;

use wicket_kernel::{
    RouteDescriptor, RouteTable, SessionRecord, SessionStore, SessionVerifier, Verdict,
};

/// Build a [`SessionRecord`] from its three fields.
pub fn record(username: &str, role: &str, user_id: &str) -> SessionRecord {
    SessionRecord {
        username: username.to_string(),
        role: role.to_string(),
        user_id: user_id.to_string(),
    }
}

/// Route table mirroring a small image-hosting frontend: a public landing
/// and login page, protected management views, and one alias entry.
pub fn sample_routes() -> RouteTable {
    let mut table = RouteTable::new();
    table.register(RouteDescriptor::new("/login").with_title("Log in").public());
    table.register(RouteDescriptor::new("/").with_title("Pictoria").public());
    table.register(RouteDescriptor::new("/upload").with_title("Upload image"));
    table.register(RouteDescriptor::new("/gallery").redirect_to("/"));
    table.register(
        RouteDescriptor::new("/random")
            .with_title("Random image")
            .public(),
    );
    table.register(RouteDescriptor::new("/stats").with_title("Site statistics"));
    table.register(RouteDescriptor::new("/settings").with_title("Site settings"));
    table
}

/// In-memory session store that counts reads and writes.
#[derive(Debug, Default)]
pub struct CountingStore {
    entries: Mutex<HashMap<String, String>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStore {
    /// Create an empty counting store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `get` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SessionStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Session store whose every operation fails, for exercising degraded
/// paths.
#[derive(Debug, Default)]
pub struct FailingStore;

impl SessionStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        anyhow::bail!("store read refused")
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("store write refused")
    }

    fn remove(&self, _key: &str) -> Result<()> {
        anyhow::bail!("store remove refused")
    }
}

enum Scripted {
    LoggedIn(SessionRecord),
    NotLoggedIn,
    Fault(String),
}

/// Verifier that replays a scripted sequence of verdicts and counts calls.
///
/// An exhausted script answers not-logged-in. An optional rendezvous
/// barrier holds every call until the expected number of concurrent
/// navigations has reached the verifier, which pins down races on the
/// session cache.
#[derive(Default)]
pub struct ScriptedVerifier {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    rendezvous: Option<Arc<Barrier>>,
}

impl ScriptedVerifier {
    /// Create a verifier with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a logged-in verdict carrying `record`.
    pub fn then_logged_in(self, record: SessionRecord) -> Self {
        self.script.lock().push_back(Scripted::LoggedIn(record));
        self
    }

    /// Append a clean not-logged-in verdict.
    pub fn then_not_logged_in(self) -> Self {
        self.script.lock().push_back(Scripted::NotLoggedIn);
        self
    }

    /// Append a transport fault with `message`.
    pub fn then_fault(self, message: &str) -> Self {
        self.script
            .lock()
            .push_back(Scripted::Fault(message.to_string()));
        self
    }

    /// Hold each call at `barrier` until all parties arrive.
    pub fn with_rendezvous(mut self, barrier: Arc<Barrier>) -> Self {
        self.rendezvous = Some(barrier);
        self
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionVerifier for ScriptedVerifier {
    async fn verify(&self) -> Result<Verdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }

        let next = self.script.lock().pop_front();
        match next {
            Some(Scripted::LoggedIn(record)) => Ok(Verdict::LoggedIn(record)),
            Some(Scripted::NotLoggedIn) | None => Ok(Verdict::NotLoggedIn),
            Some(Scripted::Fault(message)) => Err(anyhow::anyhow!(message)),
        }
    }
}
