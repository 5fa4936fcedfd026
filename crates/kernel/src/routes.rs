//! Route table: static per-route display and access metadata.
//!
//! Routes are configuration data assembled at startup, either directly via
//! [`RouteTable::register`] or from a JSON array with
//! [`RouteTable::from_json`]. The guard consults the table on every
//! navigation attempt; nothing mutates it afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GuardError, GuardResult};

/// A single route's display and access metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// URL path (e.g. `/upload`). Unique within a table.
    pub path: String,

    /// Display title for the document while this route is active.
    ///
    /// Redirect-only entries carry none; title resolution falls back to the
    /// configured default.
    #[serde(default)]
    pub title: Option<String>,

    /// Whether the route may be shown without an established session.
    /// Routes are protected unless this is set.
    #[serde(default, alias = "public")]
    pub is_public: bool,

    /// Alias target: navigating to this path re-dispatches to the target
    /// path instead of rendering anything.
    #[serde(default)]
    pub redirect: Option<String>,
}

impl RouteDescriptor {
    /// Create a protected descriptor for `path` with no title.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            is_public: false,
            redirect: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark the route as public.
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Turn the entry into an alias for `target`.
    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }
}

/// All route descriptors, indexed by path.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteDescriptor>,
}

impl RouteTable {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a table from a JSON array of descriptors.
    ///
    /// This is the configuration-time entry point: the array typically ships
    /// with the application as static data.
    pub fn from_json(json: &str) -> GuardResult<Self> {
        let descriptors: Vec<RouteDescriptor> = serde_json::from_str(json)
            .map_err(|e| GuardError::RouteConfig(e.to_string()))?;

        let mut table = Self::new();
        for descriptor in descriptors {
            table.register(descriptor);
        }
        debug!(routes = table.len(), "built route table");
        Ok(table)
    }

    /// Register a descriptor. A duplicate path replaces the prior entry;
    /// the replacement is logged so misconfiguration is visible.
    pub fn register(&mut self, descriptor: RouteDescriptor) {
        let path = descriptor.path.clone();
        if self.routes.insert(path.clone(), descriptor).is_some() {
            warn!(path = %path, "duplicate route path replaces earlier entry");
        }
    }

    /// Look up the descriptor for an exact path.
    ///
    /// `None` is the explicit not-found outcome: callers apply the
    /// default-title and protected-by-default policies themselves.
    pub fn find(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.get(path)
    }

    /// Iterate over all descriptors.
    pub fn all(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.values()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
