#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Shared setup for guard integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use wicket_kernel::{
    GuardConfig, NavigationGuard, NavigationRequest, SessionStore, SessionVerifier,
};
use wicket_test_utils::sample_routes;

/// Install a subscriber that prints guard diagnostics when `RUST_LOG` is
/// set. Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Build a guard over the sample route table with default configuration.
pub fn guard(
    store: Arc<dyn SessionStore>,
    verifier: Arc<dyn SessionVerifier>,
) -> NavigationGuard {
    init_tracing();
    NavigationGuard::new(sample_routes(), store, verifier, GuardConfig::default())
}

/// A navigation attempt from the landing page to `to`.
pub fn navigate(to: &str) -> NavigationRequest {
    NavigationRequest {
        to: to.to_string(),
        from: "/".to_string(),
    }
}
