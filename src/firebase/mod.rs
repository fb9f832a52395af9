// ABOUTME: Firebase Admin access over REST: credentials, tokens, and the three service clients
// ABOUTME: FirebaseConnector turns a key file into the Backend the seeder writes through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Firebase Admin
//!
//! All three services are reached with service-account credentials:
//!
//! - Firebase Auth through Identity Toolkit `v1/projects/{project}/accounts`
//! - Cloud Firestore through `documents:commit`
//! - the Realtime Database through `{path}.json?access_token=...`
//!
//! Firestore and Identity Toolkit share one `cloud-platform` token. The
//! Realtime Database token comes from a second exchange with database scopes.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use caretrack_core::errors::{AppError, AppResult};
use tracing::info;

use crate::backend::{Backend, BackendConnector};
use crate::config::environment::PROJECT_ID_ENV;
use crate::config::SeedConfig;
use crate::http_client::shared_client;

/// Service-account key files
pub mod credentials;
/// Cloud Firestore document writes
pub mod firestore;
/// Firebase Auth accounts
pub mod identity;
/// Realtime Database appends
pub mod rtdb;
/// OAuth2 access tokens
pub mod token;

use credentials::ServiceAccountKey;
use firestore::FirestoreClient;
use identity::IdentityToolkitClient;
use rtdb::RealtimeDatabaseClient;
use token::{ServiceAccountAuth, CLOUD_PLATFORM_SCOPE, REALTIME_DATABASE_SCOPES};

/// Connects to the Firebase project named by a service-account key
#[derive(Debug, Clone)]
pub struct FirebaseConnector {
    config: SeedConfig,
}

impl FirebaseConnector {
    /// Connector using `config` for project, database, and endpoint overrides
    #[must_use]
    pub const fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    fn project_id(&self, key: &ServiceAccountKey) -> AppResult<String> {
        self.config
            .project_id
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| {
                AppError::config_invalid(format!(
                    "Key file has no project_id and {PROJECT_ID_ENV} is not set"
                ))
            })
    }
}

#[async_trait]
impl BackendConnector for FirebaseConnector {
    async fn connect(&self, credential_path: &Path) -> AppResult<Backend> {
        let key = Arc::new(ServiceAccountKey::from_file(credential_path)?);
        let project_id = self.project_id(&key)?;
        let database_url = self.config.realtime_database_url(&project_id)?;
        let http = shared_client().clone();

        let admin_auth = Arc::new(ServiceAccountAuth::new(
            Arc::clone(&key),
            &[CLOUD_PLATFORM_SCOPE],
            http.clone(),
        ));
        let realtime_auth = Arc::new(ServiceAccountAuth::new(
            Arc::clone(&key),
            &REALTIME_DATABASE_SCOPES,
            http.clone(),
        ));

        let endpoints = &self.config.endpoints;
        let backend = Backend {
            identity: Arc::new(IdentityToolkitClient::new(
                http.clone(),
                Arc::clone(&admin_auth),
                &endpoints.identity_toolkit,
                &project_id,
            )),
            documents: Arc::new(FirestoreClient::new(
                http.clone(),
                admin_auth,
                &endpoints.firestore,
                &project_id,
            )),
            realtime: Arc::new(RealtimeDatabaseClient::new(http, realtime_auth, &database_url)),
        };

        info!(
            project_id = %project_id,
            client_email = %key.client_email,
            database_url = %database_url,
            "Initialized Firebase Admin for project"
        );
        Ok(backend)
    }
}
