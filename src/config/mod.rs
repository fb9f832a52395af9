// ABOUTME: Configuration management module for the seeder's environment-only settings
// ABOUTME: Resolves the credential file path and Firebase endpoint overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration module
//!
//! The seeder has no configuration file format. Everything comes from the
//! environment:
//!
//! - **Credential file**: `FIREBASE_KEY_FILE`, else `firebase-adminsdk.json`
//! - **Project**: `FIREBASE_PROJECT_ID`, else the key file's `project_id`
//! - **Realtime Database**: `FIREBASE_DATABASE_URL`, else the project's default instance
//! - **Logging**: `RUST_LOG` and `LOG_FORMAT` (see [`crate::logging`])

/// Environment-driven seeder configuration
pub mod environment;

pub use environment::{FirebaseEndpoints, SeedConfig};
