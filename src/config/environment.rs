// ABOUTME: Environment-based configuration for the Firebase seeder
// ABOUTME: Credential path resolution is the only check that can stop a run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::env;
use std::path::{Path, PathBuf};

use caretrack_core::errors::{AppError, AppResult};
use tracing::{debug, info};
use url::Url;

/// Environment variable overriding the service-account key path
pub const KEY_FILE_ENV: &str = "FIREBASE_KEY_FILE";

/// Key path used when `FIREBASE_KEY_FILE` is unset
pub const DEFAULT_KEY_FILE: &str = "firebase-adminsdk.json";

/// Environment variable overriding the project id from the key file
pub const PROJECT_ID_ENV: &str = "FIREBASE_PROJECT_ID";

/// Environment variable overriding the Realtime Database URL
///
/// Required for databases outside `us-central1`, which are served from
/// `https://{instance}.{region}.firebasedatabase.app`.
pub const DATABASE_URL_ENV: &str = "FIREBASE_DATABASE_URL";

/// Google Identity Toolkit API base
pub const IDENTITY_TOOLKIT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Cloud Firestore API base
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// REST API base URLs for the admin services
///
/// Production code always uses the defaults; tests point these at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseEndpoints {
    /// Identity Toolkit base URL (no trailing slash)
    pub identity_toolkit: String,
    /// Firestore base URL (no trailing slash)
    pub firestore: String,
}

impl Default for FirebaseEndpoints {
    fn default() -> Self {
        Self {
            identity_toolkit: IDENTITY_TOOLKIT_BASE_URL.to_owned(),
            firestore: FIRESTORE_BASE_URL.to_owned(),
        }
    }
}

/// Seeder configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Service-account key file
    pub key_file: PathBuf,
    /// Project id override
    pub project_id: Option<String>,
    /// Realtime Database URL override
    pub database_url: Option<String>,
    /// Admin REST endpoints
    pub endpoints: FirebaseEndpoints,
}

impl SeedConfig {
    /// Configuration for an explicit key file, everything else defaulted
    pub fn new(key_file: impl Into<PathBuf>) -> Self {
        Self {
            key_file: key_file.into(),
            project_id: None,
            database_url: None,
            endpoints: FirebaseEndpoints::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `FIREBASE_KEY_FILE` - service-account key path (default: `firebase-adminsdk.json`)
    /// - `FIREBASE_PROJECT_ID` - project id (default: from the key file)
    /// - `FIREBASE_DATABASE_URL` - Realtime Database URL (default: project's default instance)
    #[must_use]
    pub fn from_env() -> Self {
        let key_file = env::var(KEY_FILE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_KEY_FILE), PathBuf::from);

        let config = Self {
            key_file,
            project_id: non_empty_var(PROJECT_ID_ENV),
            database_url: non_empty_var(DATABASE_URL_ENV),
            endpoints: FirebaseEndpoints::default(),
        };

        debug!(
            key_file = %config.key_file.display(),
            project_id = config.project_id.as_deref().unwrap_or("(from key file)"),
            database_url = config.database_url.as_deref().unwrap_or("(project default)"),
            "Seeder configuration loaded"
        );

        config
    }

    /// Check that the credential file exists and return its path
    ///
    /// # Errors
    ///
    /// Returns a `ConfigMissing` error when the file does not exist. This is
    /// the one fatal condition of a seeding run.
    pub fn resolve_credential(&self) -> AppResult<&Path> {
        if !self.key_file.is_file() {
            return Err(AppError::config_missing(format!(
                "Firebase key file not found: {}",
                self.key_file.display()
            ))
            .with_resource_id(self.key_file.display().to_string()));
        }

        info!(key_file = %self.key_file.display(), "Using Firebase key file");
        Ok(&self.key_file)
    }

    /// Realtime Database base URL for a project, without a trailing slash
    ///
    /// Without an override this is `https://{project}-default-rtdb.firebaseio.com`,
    /// which only reaches a default instance in `us-central1`. Regional
    /// instances (`*.firebasedatabase.app`) need `FIREBASE_DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error when the override is not an absolute URL.
    pub fn realtime_database_url(&self, project_id: &str) -> AppResult<String> {
        let Some(raw) = self.database_url.as_deref() else {
            return Ok(format!("https://{project_id}-default-rtdb.firebaseio.com"));
        };

        let parsed = Url::parse(raw).map_err(|e| {
            AppError::config_invalid(format!("{DATABASE_URL_ENV} is not a valid URL: {e}"))
                .with_source(e)
        })?;

        Ok(parsed.as_str().trim_end_matches('/').to_owned())
    }

    /// Operator hint logged when the key file cannot be found
    #[must_use]
    pub fn missing_key_hint(&self) -> String {
        format!(
            "Set {KEY_FILE_ENV} or place key at {}; set {DATABASE_URL_ENV} if the \
             Realtime Database is regional (*.firebasedatabase.app)",
            self.key_file.display()
        )
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
