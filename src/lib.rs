// ABOUTME: Library entry point for the NeuroRehab CareTrack demo-data seeder
// ABOUTME: Seeds Firebase Auth, Cloud Firestore and the Realtime Database over REST
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # CareTrack Seed
//!
//! Populates a NeuroRehab CareTrack Firebase project with demo staff, settings
//! lists, patients, reports, and chat messages.
//!
//! ## Architecture
//!
//! - **Config**: environment-only settings, chiefly the service-account key path
//! - **Firebase**: service-account tokens and the three REST clients
//! - **Backend**: the traits the seeder writes through, plus an in-memory store
//! - **Seed**: demo fixtures and the seeding sequence
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use caretrack_seed::config::SeedConfig;
//! use caretrack_seed::firebase::FirebaseConnector;
//! use caretrack_seed::seed::{self, SeedPlan};
//!
//! # async fn example() -> caretrack_seed::errors::AppResult<()> {
//! let config = SeedConfig::from_env();
//! let connector = FirebaseConnector::new(config.clone());
//! let summary = seed::run(&config, &connector, &SeedPlan::demo()).await?;
//! println!("Seeded {} clients", summary.client_ids.len());
//! # Ok(())
//! # }
//! ```

/// Backend seams and the in-memory backend
pub mod backend;

/// Environment configuration
pub mod config;

/// Firebase Admin REST clients
pub mod firebase;

/// Shared HTTP client
pub mod http_client;

/// Structured logging setup
pub mod logging;

/// Demo data and the seeding sequence
pub mod seed;

pub use caretrack_core::{constants, errors, models};
