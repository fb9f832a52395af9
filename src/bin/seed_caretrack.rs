// ABOUTME: Command-line entry point that seeds a CareTrack Firebase project with demo data
// ABOUTME: Exits non-zero only when the service-account key is missing or unusable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Demo data seeder for NeuroRehab CareTrack.
//!
//! Creates the demo staff logins, the organisation settings lists, four
//! clients with diagnosis history and reports, and one chat message per
//! channel. Takes no arguments; everything is read from the environment.
//!
//! Usage:
//! ```bash
//! # Key file in the working directory (firebase-adminsdk.json)
//! cargo run --bin seed-caretrack
//!
//! # Key file elsewhere
//! FIREBASE_KEY_FILE=/path/to/key.json cargo run --bin seed-caretrack
//!
//! # Regional Realtime Database
//! FIREBASE_DATABASE_URL=https://my-project-default-rtdb.europe-west1.firebasedatabase.app \
//!   cargo run --bin seed-caretrack
//!
//! # JSON logs
//! LOG_FORMAT=json RUST_LOG=debug cargo run --bin seed-caretrack
//! ```

use std::io;

use anyhow::Result;
use caretrack_seed::config::SeedConfig;
use caretrack_seed::errors::ErrorCode;
use caretrack_seed::firebase::FirebaseConnector;
use caretrack_seed::http_client::{initialize_shared_client, HttpClientConfig};
use caretrack_seed::logging;
use caretrack_seed::seed::{self, write_logins, SeedPlan};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;
    initialize_shared_client(HttpClientConfig::default());

    let config = SeedConfig::from_env();
    let plan = SeedPlan::demo();
    let connector = FirebaseConnector::new(config.clone());

    let summary = match seed::run(&config, &connector, &plan).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Seeding aborted");
            if e.code == ErrorCode::ConfigMissing {
                error!("{}", config.missing_key_hint());
            }
            return Err(e.into());
        }
    };

    if !summary.warnings.is_empty() {
        warn!(
            skipped = summary.warnings.len(),
            "Some demo records were skipped; see warnings above"
        );
    }

    write_logins(&plan.staff, &mut io::stdout().lock())?;
    Ok(())
}
