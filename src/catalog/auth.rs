//! Authenticated Client
//!
//! Performs GET requests against the catalog with a bearer credential and hides
//! credential expiry from callers: a failed request triggers a fresh login and a
//! retry, bounded by the caller's retry budget.
//!
//! Only HTTP failure statuses are retried. Connection errors and timeouts surface
//! as [`Error::Transport`] immediately.

use super::protocol::{AuthRequest, AuthResponse};
use crate::error::{Error, Result};

use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;

/// Short-lived bearer token for the remote catalog.
///
/// Acquired at the start of a synchronization pass and dropped at its end.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    valid: bool,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            valid: true,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `false` once a refresh attempt for this credential has been rejected.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("valid", &self.valid)
            .finish()
    }
}

pub struct AuthenticatedClient {
    http_client: reqwest::Client,
    auth_url: String,
    api_key: String,
}

impl AuthenticatedClient {
    pub fn new(auth_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            auth_url: auth_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Exchanges the configured API key for a fresh credential.
    ///
    /// # Errors
    /// * [`Error::Auth`] if the endpoint answers with a non-200 status, `auth: false`,
    ///   an undecodable body or an empty token.
    /// * [`Error::Transport`] if the endpoint cannot be reached.
    pub async fn authenticate(&self) -> Result<Credential> {
        let response = self
            .http_client
            .post(&self.auth_url)
            .json(&AuthRequest {
                api_key: self.api_key.clone(),
            })
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::Auth(format!(
                "auth endpoint answered {}",
                response.status()
            )));
        }

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| Error::Auth(format!("unreadable auth response: {}", e)))?;

        match body.token {
            Some(token) if body.auth && !token.is_empty() => {
                tracing::debug!("Acquired catalog credential");
                Ok(Credential::new(token))
            }
            _ => Err(Error::Auth("auth endpoint rejected the api key".to_string())),
        }
    }

    /// GET `url` with `credential`, re-authenticating and retrying on failure.
    ///
    /// On a 4xx/5xx response with budget left, a new credential is requested and
    /// stored in `credential` before the same request is sent again. If that login
    /// itself is rejected the credential is marked invalid and the failed response
    /// is returned as-is. With no budget left the failed response is returned too;
    /// interpreting it is up to the caller.
    pub async fn get_with_retry(
        &self,
        url: &str,
        credential: &mut Credential,
        retries: u32,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        let mut remaining = retries;

        loop {
            let response = self
                .http_client
                .get(url)
                .bearer_auth(credential.token())
                .header(CONTENT_TYPE, "application/json")
                .query(query)
                .send()
                .await?;

            let status = response.status();
            if !(status.is_client_error() || status.is_server_error()) {
                return Ok(response);
            }

            if remaining == 0 {
                tracing::debug!("GET {} failed with {}, no retries left", url, status);
                return Ok(response);
            }

            tracing::debug!(
                "GET {} failed with {}, refreshing credential ({} retries left)",
                url,
                status,
                remaining
            );

            match self.authenticate().await {
                Ok(fresh) => *credential = fresh,
                Err(Error::Auth(reason)) => {
                    tracing::warn!(
                        "Credential refresh rejected, giving up on {}: {}",
                        url,
                        reason
                    );
                    credential.invalidate();
                    return Ok(response);
                }
                Err(e) => return Err(e),
            }

            remaining -= 1;
        }
    }
}
