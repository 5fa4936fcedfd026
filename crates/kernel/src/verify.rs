//! Remote session verification.
//!
//! The verifier answers one question: does the server consider the current
//! session logged in? The wire shape is the status endpoint's envelope:
//!
//! ```json
//! { "code": 200, "message": "success",
//!   "data": { "logged_in": true, "username": "ada", "role": "admin", "user_id": "7" } }
//! ```
//!
//! A session counts as verified only when `code` is 200 and
//! `data.logged_in` is true. Every other decodable response is a clean
//! "not logged in"; transport and decode faults surface as errors, which
//! the guard handles uniformly.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::session::SessionRecord;

/// Envelope returned by the status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: StatusData,
}

/// Identity payload inside the envelope.
///
/// Every field defaults: the not-logged-in response omits identity fields
/// entirely.
#[derive(Debug, Default, Deserialize)]
pub struct StatusData {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Distilled answer from the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The server vouches for the session, with the identity it reported.
    LoggedIn(SessionRecord),
    /// The server answered, and the answer is no.
    NotLoggedIn,
}

impl StatusEnvelope {
    /// Collapse the envelope into a [`Verdict`].
    ///
    /// Identity fields missing from an otherwise successful response map to
    /// empty strings; partial payloads do not fail verification.
    pub fn into_verdict(self) -> Verdict {
        if self.code == 200 && self.data.logged_in {
            Verdict::LoggedIn(SessionRecord {
                username: self.data.username.unwrap_or_default(),
                role: self.data.role.unwrap_or_default(),
                user_id: self.data.user_id.unwrap_or_default(),
            })
        } else {
            Verdict::NotLoggedIn
        }
    }
}

/// Authoritative source for session state.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Ask the server whether the current session is logged in.
    ///
    /// `Err` covers transport failures and undecodable payloads; callers
    /// treat both the same way.
    async fn verify(&self) -> Result<Verdict>;
}

/// Verifier backed by an HTTP status endpoint.
pub struct HttpVerifier {
    client: reqwest::Client,
    url: String,
}

impl HttpVerifier {
    /// Create a verifier for `url` with a default client.
    ///
    /// No timeout is configured here; request deadlines belong to the
    /// transport layer. Use [`HttpVerifier::with_client`] to supply a
    /// client carrying cookies, timeouts, or proxy settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Create a verifier using a pre-configured client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SessionVerifier for HttpVerifier {
    async fn verify(&self) -> Result<Verdict> {
        let envelope: StatusEnvelope = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("session verification request failed")?
            .json()
            .await
            .context("session verification response did not decode")?;

        Ok(envelope.into_verdict())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn logged_in_envelope_yields_identity() {
        let envelope: StatusEnvelope = serde_json::from_str(
            r#"{"code": 200, "message": "success",
                "data": {"logged_in": true, "username": "ada", "role": "admin", "user_id": "7"}}"#,
        )
        .unwrap();

        match envelope.into_verdict() {
            Verdict::LoggedIn(record) => {
                assert_eq!(record.username, "ada");
                assert_eq!(record.role, "admin");
                assert_eq!(record.user_id, "7");
            }
            Verdict::NotLoggedIn => panic!("expected logged-in verdict"),
        }
    }

    #[test]
    fn logged_out_envelope_denies() {
        let envelope: StatusEnvelope =
            serde_json::from_str(r#"{"code": 200, "data": {"logged_in": false}}"#).unwrap();
        assert_eq!(envelope.into_verdict(), Verdict::NotLoggedIn);
    }

    #[test]
    fn non_200_code_denies_even_when_logged_in() {
        let envelope: StatusEnvelope =
            serde_json::from_str(r#"{"code": 401, "data": {"logged_in": true}}"#).unwrap();
        assert_eq!(envelope.into_verdict(), Verdict::NotLoggedIn);
    }

    #[test]
    fn missing_identity_fields_map_to_empty_strings() {
        let envelope: StatusEnvelope =
            serde_json::from_str(r#"{"code": 200, "data": {"logged_in": true}}"#).unwrap();

        match envelope.into_verdict() {
            Verdict::LoggedIn(record) => {
                assert_eq!(record.username, "");
                assert_eq!(record.role, "");
                assert_eq!(record.user_id, "");
            }
            Verdict::NotLoggedIn => panic!("expected logged-in verdict"),
        }
    }

    #[test]
    fn missing_data_object_denies() {
        let envelope: StatusEnvelope = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert_eq!(envelope.into_verdict(), Verdict::NotLoggedIn);
    }
}
