// ABOUTME: Data model written to the CareTrack backend by the seeder
// ABOUTME: Re-exports staff, org config, client, report, and chat message types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data Models
//!
//! Every type here serializes to the exact field names the CareTrack web app
//! reads (`camelCase`), so a model can be turned into a document with
//! `serde_json::to_value` and nothing else. Server-filled timestamps are not
//! part of the models; the writer attaches them per call.

mod chat;
mod client;
mod org_config;
mod report;
mod staff;

pub use chat::{channel_key, ChatChannel, ChatMessage};
pub use client::{Client, ClientStatus, ClientTemplate, DiagnosisHistoryEntry, RiskLevel, StayPlan};
pub use org_config::OrgConfig;
pub use report::{ActivityRecord, Report, ReportPayload, ReportSection};
pub use staff::{StaffAccount, UserProfile};
