// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Store paths, document ids, and fixed date offsets used by the seeder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list. Paths are the ones the CareTrack web app reads.

/// Document store collection names
pub mod collections {
    /// Staff profile documents keyed by identity id
    pub const USER_PROFILES: &str = "userProfiles";
    /// Organisation-wide settings
    pub const CONFIG: &str = "config";
    /// Patient records
    pub const CLIENTS: &str = "clients";
    /// Per-client diagnosis history (sub-collection of `clients`)
    pub const DIAGNOSIS_HISTORY: &str = "diagnosisHistory";
    /// Section reports
    pub const REPORTS: &str = "reports";

    /// Path of a sub-collection under a parent document
    #[must_use]
    pub fn subcollection(parent_collection: &str, parent_id: &str, name: &str) -> String {
        format!("{parent_collection}/{parent_id}/{name}")
    }
}

/// Fixed document identifiers
pub mod documents {
    /// Singleton org config document id (under `config`)
    pub const ORG_CONFIG: &str = "org";
}

/// Realtime store layout
pub mod realtime {
    /// Root node holding one child per chat channel
    pub const CHAT_ROOT: &str = "chat";
    /// Channel whose messages are flagged urgent
    pub const URGENT_CHANNEL_KEY: &str = "Urgent_Alerts";
    /// Realtime REST request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    /// How much of an error body is echoed to the log
    pub const ERROR_BODY_PREVIEW_CHARS: usize = 200;
}

/// Client stay windows, relative to the day the seeder runs
pub mod stay {
    /// Long stay: admitted a month ago
    pub const LONG_ADMITTED_DAYS_AGO: i64 = 30;
    /// Long stay: discharge planned a month out
    pub const LONG_DISCHARGE_IN_DAYS: i64 = 30;
    /// Short stay: admitted two weeks ago
    pub const SHORT_ADMITTED_DAYS_AGO: i64 = 14;
    /// Short stay: discharge planned in fifteen days
    pub const SHORT_DISCHARGE_IN_DAYS: i64 = 15;
    /// Calendar date format used for every date field
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Limits on dependent records
pub mod limits {
    /// Only the first N clients receive a diagnosis history entry
    pub const DIAGNOSIS_HISTORY_CLIENTS: usize = 2;
}

/// Server-filled timestamp field names
pub mod fields {
    /// Creation timestamp
    pub const CREATED_AT: &str = "createdAt";
    /// Last update timestamp
    pub const UPDATED_AT: &str = "updatedAt";
}
