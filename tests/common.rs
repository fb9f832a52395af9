// ABOUTME: Shared test utilities for the seeder integration tests
// ABOUTME: Provides quiet logging, throwaway RSA service-account keys, and demo plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `caretrack_seed`

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};

use caretrack_seed::models::StaffAccount;
use caretrack_seed::seed::SeedPlan;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::json;

static INIT_LOGGER: Once = Once::new();

/// Project id written into generated key files
pub const TEST_PROJECT_ID: &str = "caretrack-test";

/// Service account email written into generated key files
pub const TEST_CLIENT_EMAIL: &str = "seeder@caretrack-test.iam.gserviceaccount.com";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// PEM pair for a 2048-bit key, generated once per test binary
pub struct TestKeyPair {
    /// PKCS#8 private key
    pub private_pem: String,
    /// SPKI public key
    pub public_pem: String,
}

/// Shared throwaway RSA key
pub fn test_key_pair() -> &'static TestKeyPair {
    static KEY: OnceLock<TestKeyPair> = OnceLock::new();
    KEY.get_or_init(|| {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
        let public = RsaPublicKey::from(&private);
        TestKeyPair {
            private_pem: private.to_pkcs8_pem(LineEnding::LF).unwrap().to_string(),
            public_pem: public.to_public_key_pem(LineEnding::LF).unwrap(),
        }
    })
}

/// Service-account key JSON pointing its token endpoint at `token_uri`
pub fn key_json(token_uri: &str, project_id: Option<&str>) -> serde_json::Value {
    let mut key = json!({
        "type": "service_account",
        "private_key_id": "test-key-id",
        "private_key": test_key_pair().private_pem,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "1234567890",
        "token_uri": token_uri,
    });
    if let Some(project_id) = project_id {
        key["project_id"] = json!(project_id);
    }
    key
}

/// Write a key file into `dir` and return its path
pub fn write_key_file(dir: &Path, token_uri: &str, project_id: Option<&str>) -> PathBuf {
    let path = dir.join("firebase-adminsdk.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&key_json(token_uri, project_id)).unwrap(),
    )
    .unwrap();
    path
}

/// Demo plan with a single admin account
pub fn single_admin_plan() -> SeedPlan {
    SeedPlan::demo().with_staff(vec![StaffAccount::new("a@x.com", "P1", "A", &["admin"])])
}
