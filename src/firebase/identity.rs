// ABOUTME: Identity Toolkit admin client creating and looking up Firebase Auth users
// ABOUTME: Maps the EMAIL_EXISTS error onto the already-exists conflict code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;

use async_trait::async_trait;
use caretrack_core::errors::{AppError, AppResult, ErrorCode};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::token::ServiceAccountAuth;
use crate::backend::IdentityProvider;

/// Error message Identity Toolkit returns for a taken email
const EMAIL_EXISTS: &str = "EMAIL_EXISTS";

/// Create-account request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

/// Create-account response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountResponse {
    local_id: String,
}

/// Lookup response; `users` is absent when nothing matched
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Firebase Auth admin client over the Identity Toolkit v1 REST API
pub struct IdentityToolkitClient {
    http_client: Client,
    auth: Arc<ServiceAccountAuth>,
    base_url: String,
    project_id: String,
}

impl IdentityToolkitClient {
    /// Create a client for `project_id`
    #[must_use]
    pub fn new(
        http_client: Client,
        auth: Arc<ServiceAccountAuth>,
        base_url: &str,
        project_id: &str,
    ) -> Self {
        Self {
            http_client,
            auth,
            base_url: base_url.trim_end_matches('/').to_owned(),
            project_id: project_id.to_owned(),
        }
    }

    /// URL of `accounts` or one of its custom methods (`:lookup`)
    #[must_use]
    pub fn accounts_url(&self, method: Option<&str>) -> String {
        let base = format!("{}/v1/projects/{}/accounts", self.base_url, self.project_id);
        match method {
            Some(method) => format!("{base}:{method}"),
            None => base,
        }
    }
}

/// Turn a non-success Identity Toolkit response into an `AppError`
async fn identity_error(response: Response, email: &str) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map_or_else(|_| format!("HTTP {status}"), |e| e.error.message);

    // Messages look like "EMAIL_EXISTS" or "WEAK_PASSWORD : Password should be ..."
    let code = message.split(':').next().unwrap_or_default().trim();
    let error = if code == EMAIL_EXISTS {
        AppError::already_exists(format!("identity {email}"))
    } else if status.as_u16() == 401 || status.as_u16() == 403 {
        AppError::new(ErrorCode::ExternalAuthFailed, format!("identity: {message}"))
    } else {
        AppError::external_service("identity", message)
    };
    error.with_resource_id(email)
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AppResult<String> {
        let token = self.auth.access_token().await?;
        let response = self
            .http_client
            .post(self.accounts_url(None))
            .bearer_auth(token.secret())
            .json(&CreateAccountRequest {
                email,
                password,
                display_name,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(identity_error(response, email).await);
        }

        let created: CreateAccountResponse = response.json().await?;
        debug!(email = %email, uid = %created.local_id, "Identity created");
        Ok(created.local_id)
    }

    async fn lookup_identity_by_email(&self, email: &str) -> AppResult<String> {
        let token = self.auth.access_token().await?;
        let response = self
            .http_client
            .post(self.accounts_url(Some("lookup")))
            .bearer_auth(token.secret())
            .json(&json!({ "email": [email] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(identity_error(response, email).await);
        }

        let found: LookupResponse = response.json().await?;
        found
            .users
            .into_iter()
            .next()
            .map(|user| user.local_id)
            .ok_or_else(|| AppError::not_found(format!("identity {email}")).with_resource_id(email))
    }
}
