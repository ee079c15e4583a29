//! Outbound identity-provider exchange
//!
//! The OAuth dance happens entirely on the provider's side; this service only
//! trades the opaque session id it receives for a verified profile.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Profile returned by a successful exchange
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Failure modes of the exchange
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The provider answered with a non-success status
    #[error("identity provider rejected the session exchange: {0}")]
    Rejected(StatusCode),

    /// The provider could not be reached or returned an unusable body
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Contract for verifying an external session id against the provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, external_session_id: &str) -> Result<IdentityProfile, IdentityError>;
}

/// HTTP identity provider client.
///
/// Carries a fixed request timeout so a slow upstream cannot hold a login
/// request indefinitely.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpIdentityProvider {
    /// Create a client for the given exchange endpoint
    pub fn new(url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify(&self, external_session_id: &str) -> Result<IdentityProfile, IdentityError> {
        let response = self
            .client
            .get(&self.url)
            .header("X-Session-ID", external_session_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Rejected(response.status()));
        }

        Ok(response.json::<IdentityProfile>().await?)
    }
}
