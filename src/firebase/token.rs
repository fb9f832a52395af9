// ABOUTME: OAuth2 service-account token exchange with RS256-signed JWT assertions
// ABOUTME: Caches the access token per scope set and refreshes it shortly before expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Service-account access tokens
//!
//! Google's admin APIs accept a bearer token minted by posting a signed JWT
//! assertion to the key file's `token_uri`:
//!
//! - `iss` is the service account email, `aud` is the token endpoint
//! - `scope` is the space-separated scope list the token is good for
//! - the assertion lives for one hour; the returned token says how long it lives
//!
//! The Firestore/Identity Toolkit token and the Realtime Database token are
//! separate exchanges with separate scopes, each with its own cache.

use std::fmt;
use std::sync::Arc;

use caretrack_core::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::credentials::ServiceAccountKey;

/// Scope covering Firestore and Identity Toolkit admin calls
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Scopes required by the Realtime Database REST API
pub const REALTIME_DATABASE_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/firebase.database",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// JWT bearer grant type
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime in seconds (the maximum Google accepts)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this many seconds before they expire
const REFRESH_MARGIN_SECS: i64 = 60;

/// A bearer token and its expiry
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Wrap a token string
    pub fn new(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    /// Token value for the `Authorization` header or `access_token` parameter
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether the token is still usable at `now`, with the refresh margin applied
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Claims of the signed assertion
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Successful token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// Token endpoint error body
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Mints and caches access tokens for one scope set
pub struct ServiceAccountAuth {
    key: Arc<ServiceAccountKey>,
    scopes: Vec<String>,
    http_client: Client,
    cached: RwLock<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    /// Create an authenticator for the given scopes
    #[must_use]
    pub fn new(key: Arc<ServiceAccountKey>, scopes: &[&str], http_client: Client) -> Self {
        Self {
            key,
            scopes: scopes.iter().map(|s| (*s).to_owned()).collect(),
            http_client,
            cached: RwLock::new(None),
        }
    }

    /// Space-separated scope string sent in the assertion
    #[must_use]
    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }

    /// Current access token, exchanging a new assertion when needed
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` if the assertion cannot be signed or the
    /// token endpoint rejects it, and `ExternalServiceUnavailable` if the
    /// endpoint cannot be reached.
    pub async fn access_token(&self) -> AppResult<AccessToken> {
        let now = Utc::now();
        let cached = self.cached.read().await.clone();
        if let Some(token) = cached.filter(|t| t.is_fresh_at(now)) {
            debug!(scope = %self.scope(), "Using cached access token");
            return Ok(token);
        }

        let token = self.exchange(now).await?;
        *self.cached.write().await = Some(token.clone());
        Ok(token)
    }

    /// Sign an assertion for `now`
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` if the private key cannot sign RS256.
    pub fn signed_assertion(&self, now: DateTime<Utc>) -> AppResult<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: self.scope(),
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key.private_key_id);

        let encoding_key =
            EncodingKey::from_rsa_pem(self.key.private_key_pem().as_bytes()).map_err(|e| {
                AppError::external_auth("service account", format!("Invalid private key: {e}"))
                    .with_source(e)
            })?;

        encode(&header, &claims, &encoding_key).map_err(|e| {
            AppError::external_auth("service account", format!("Cannot sign assertion: {e}"))
                .with_source(e)
        })
    }

    async fn exchange(&self, now: DateTime<Utc>) -> AppResult<AccessToken> {
        let assertion = self.signed_assertion(now)?;

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, token_uri = %self.key.token_uri, "Token endpoint unreachable");
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&body).map_or_else(
                |_| format!("HTTP {status}"),
                |e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                },
            );
            return Err(AppError::external_auth("token exchange", reason)
                .with_resource_id(self.key.client_email.clone()));
        }

        let body: TokenResponse = response.json().await?;
        let lifetime = body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);

        info!(
            client_email = %self.key.client_email,
            scope = %self.scope(),
            expires_in_secs = lifetime,
            "Obtained service-account access token"
        );

        Ok(AccessToken::new(
            body.access_token,
            now + Duration::seconds(lifetime),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_token_freshness_applies_margin() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        assert!(AccessToken::new("t", now + Duration::seconds(120)).is_fresh_at(now));
        assert!(!AccessToken::new("t", now + Duration::seconds(30)).is_fresh_at(now));
        assert!(!AccessToken::new("t", now).is_fresh_at(now));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("ya29.secret", Utc::now());
        assert!(!format!("{token:?}").contains("ya29"));
    }
}
