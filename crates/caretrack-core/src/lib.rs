// ABOUTME: Core types and constants for the CareTrack demo-data seeder
// ABOUTME: Foundation crate with error handling, the seeded data model, and store constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # CareTrack Core
//!
//! Foundation crate providing shared types and constants for the CareTrack
//! seeding tool. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Collection names, document ids, and fixed seeding offsets
//! - **models**: Staff accounts, profiles, org config, clients, reports, chat messages

/// Unified error handling system with standard error codes
pub mod errors;

/// Store layout constants organized by domain
pub mod constants;

/// Data model written to the backend (staff, clients, reports, chat)
pub mod models;
