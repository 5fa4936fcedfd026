//! The navigation guard: pre-navigation authorization.
//!
//! Invoked once per navigation attempt. The guard resolves the document
//! title from route metadata, then decides access in order: alias entries
//! re-dispatch, public routes pass, a present session marker passes, and
//! otherwise the remote verifier has the last word. Every attempt
//! terminates in exactly one decision, proceed or redirect, and no failure
//! escapes to the host framework.
//!
//! Concurrent attempts are independent: two navigations racing on an empty
//! cache may both reach the verifier and both write the marker. The last
//! write wins, and both writes derive from the same authenticated identity
//! in the common case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::GuardConfig;
use crate::routes::RouteTable;
use crate::session::{SessionStore, store_session};
use crate::verify::{SessionVerifier, Verdict};

/// One navigation attempt, as handed over by the host framework.
///
/// Transient: consumed by a single guard pass and discarded.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    /// Path being navigated to.
    pub to: String,
    /// Path being navigated from.
    pub from: String,
}

/// How the host framework must resolve the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Render the requested view.
    Proceed,
    /// Re-dispatch navigation to this path instead.
    Redirect(String),
}

/// A resolved navigation attempt: the document title to display and
/// exactly one decision. The title applies whichever way the decision
/// went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub title: String,
    pub decision: Decision,
}

/// Pre-navigation authorization guard.
///
/// Holds the route table plus the injected store and verifier. Cheap to
/// share: embedders typically construct one and call
/// [`NavigationGuard::authorize`] from their navigation hook.
pub struct NavigationGuard {
    routes: RouteTable,
    store: Arc<dyn SessionStore>,
    verifier: Arc<dyn SessionVerifier>,
    config: GuardConfig,
}

impl NavigationGuard {
    /// Create a guard over `routes` using the given store and verifier.
    pub fn new(
        routes: RouteTable,
        store: Arc<dyn SessionStore>,
        verifier: Arc<dyn SessionVerifier>,
        config: GuardConfig,
    ) -> Self {
        Self {
            routes,
            store,
            verifier,
            config,
        }
    }

    /// Route table this guard consults.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Resolve one navigation attempt.
    ///
    /// Always returns a resolution; verification failures are logged and
    /// resolve to a login redirect rather than propagating.
    pub async fn authorize(&self, request: &NavigationRequest) -> Resolution {
        let descriptor = self.routes.find(&request.to);

        let title = descriptor
            .and_then(|d| d.title.clone())
            .unwrap_or_else(|| self.config.default_title.clone());

        // Alias entries re-dispatch instead of rendering; the target path
        // gets its own guard pass.
        if let Some(target) = descriptor.and_then(|d| d.redirect.clone()) {
            debug!(from = %request.to, to = %target, "route alias");
            return Resolution {
                title,
                decision: Decision::Redirect(target),
            };
        }

        // Public routes need no session at all.
        if descriptor.is_some_and(|d| d.is_public) {
            return Resolution {
                title,
                decision: Decision::Proceed,
            };
        }

        // Unmatched paths land here too: no descriptor means protected.
        // A present marker allows without a round trip.
        match self.store.get(&self.config.session_key) {
            Ok(Some(raw)) if !raw.is_empty() => {
                debug!(path = %request.to, "session marker present");
                return Resolution {
                    title,
                    decision: Decision::Proceed,
                };
            }
            Ok(_) => {}
            Err(e) => {
                // A failing store reads as a miss; the verifier decides.
                warn!(error = %e, "session store read failed");
            }
        }

        match self.verifier.verify().await {
            Ok(Verdict::LoggedIn(record)) => {
                if let Err(e) =
                    store_session(self.store.as_ref(), &self.config.session_key, &record)
                {
                    warn!(error = %e, "failed to cache verified session");
                }
                debug!(path = %request.to, username = %record.username, "session verified");
                Resolution {
                    title,
                    decision: Decision::Proceed,
                }
            }
            Ok(Verdict::NotLoggedIn) => {
                debug!(path = %request.to, from = %request.from, "verifier reports no session");
                Resolution {
                    title,
                    decision: Decision::Redirect(self.config.login_path.clone()),
                }
            }
            Err(e) => {
                warn!(error = %e, path = %request.to, "session verification failed");
                Resolution {
                    title,
                    decision: Decision::Redirect(self.config.login_path.clone()),
                }
            }
        }
    }
}
