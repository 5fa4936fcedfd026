//! Kernel error types.
//!
//! Only construction-time and storage surfaces can fail; the guard's
//! decision procedure is infallible by contract and never returns these.

use thiserror::Error;

/// Errors from fallible kernel surfaces.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The route table configuration did not parse.
    #[error("invalid route table: {0}")]
    RouteConfig(String),

    /// A session store backend failed.
    #[error("session store error")]
    Store(#[from] anyhow::Error),
}

/// Result type alias using GuardError.
pub type GuardResult<T> = Result<T, GuardError>;
