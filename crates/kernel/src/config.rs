//! Guard configuration.

use std::env;

/// Navigation guard configuration.
///
/// Every field has a usable default, so `GuardConfig::default()` is a
/// working configuration for the common deployment.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Path navigations are redirected to when authorization fails
    /// (default: `/login`).
    pub login_path: String,

    /// Document title used when the target route carries none
    /// (default: `Pictoria`).
    pub default_title: String,

    /// Store key holding the session marker (default: `userInfo`).
    pub session_key: String,

    /// Status endpoint consulted when the marker is absent
    /// (default: `/api/user/status`).
    pub verify_url: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            default_title: "Pictoria".to_string(),
            session_key: "userInfo".to_string(),
            verify_url: "/api/user/status".to_string(),
        }
    }
}

impl GuardConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            login_path: env::var("WICKET_LOGIN_PATH").unwrap_or(defaults.login_path),
            default_title: env::var("WICKET_DEFAULT_TITLE").unwrap_or(defaults.default_title),
            session_key: env::var("WICKET_SESSION_KEY").unwrap_or(defaults.session_key),
            verify_url: env::var("WICKET_VERIFY_URL").unwrap_or(defaults.verify_url),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GuardConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.default_title, "Pictoria");
        assert_eq!(config.session_key, "userInfo");
        assert_eq!(config.verify_url, "/api/user/status");
    }
}
