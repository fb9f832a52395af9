// ABOUTME: Realtime Database REST client appending children with a database-scoped token
// ABOUTME: Non-success responses are reported with their status and a short body preview
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use caretrack_core::constants::realtime::{ERROR_BODY_PREVIEW_CHARS, REQUEST_TIMEOUT_SECS};
use caretrack_core::errors::{AppError, AppResult};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::token::{AccessToken, ServiceAccountAuth};
use crate::backend::RealtimeStore;

/// First `ERROR_BODY_PREVIEW_CHARS` characters of a response body
#[must_use]
pub fn body_preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

/// Realtime Database client for one database instance
pub struct RealtimeDatabaseClient {
    http_client: Client,
    auth: Arc<ServiceAccountAuth>,
    base_url: String,
}

impl RealtimeDatabaseClient {
    /// Create a client for the database at `base_url`
    ///
    /// `auth` must carry the Realtime Database scopes.
    #[must_use]
    pub fn new(http_client: Client, auth: Arc<ServiceAccountAuth>, base_url: &str) -> Self {
        Self {
            http_client,
            auth,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// REST URL of `path`
    #[must_use]
    pub fn path_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }
}

#[async_trait]
impl RealtimeStore for RealtimeDatabaseClient {
    async fn access_token(&self) -> AppResult<AccessToken> {
        self.auth.access_token().await
    }

    async fn push(&self, token: &AccessToken, path: &str, body: &Value) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.path_url(path))
            .query(&[("access_token", token.secret())])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            debug!(path = %path, "Realtime child appended");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let preview = body_preview(&text);
        warn!(path = %path, status = status.as_u16(), body = %preview, "Realtime write rejected");
        Err(
            AppError::external_service("realtime", format!("HTTP {status}: {preview}"))
                .with_resource_id(path),
        )
    }
}
