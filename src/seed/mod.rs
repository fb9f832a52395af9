// ABOUTME: Demo-data seeding for NeuroRehab CareTrack
// ABOUTME: Fixtures describe what to write; the seeder writes it through a Backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Demo data set
pub mod fixtures;
/// Seeding sequence
pub mod seeder;
/// Run outcome and login listing
pub mod summary;

pub use fixtures::SeedPlan;
pub use seeder::{attribute, run, Attribution, SeededClient, Seeder};
pub use summary::{login_lines, write_logins, SeedStep, SeedSummary, SeedWarning};
