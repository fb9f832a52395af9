// ABOUTME: Section reports filed against a client, one shape of payload per section
// ABOUTME: Sections are psychiatric, behavioral, adl, therapeutic, and risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Report category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    /// Mental state ratings
    Psychiatric,
    /// Behaviour ratings
    Behavioral,
    /// Activities of daily living levels
    Adl,
    /// Therapy attendance and engagement
    Therapeutic,
    /// Risk levels
    Risk,
}

impl ReportSection {
    /// Every section, in the order reports are filed
    pub const ALL: [Self; 5] = [
        Self::Psychiatric,
        Self::Behavioral,
        Self::Adl,
        Self::Therapeutic,
        Self::Risk,
    ];

    /// Tag stored in the `section` field
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Psychiatric => "psychiatric",
            Self::Behavioral => "behavioral",
            Self::Adl => "adl",
            Self::Therapeutic => "therapeutic",
            Self::Risk => "risk",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendance record for one therapeutic activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Attended or not (`Yes`/`No`)
    pub attendance: String,
    /// Engagement rating label
    pub engagement: String,
}

/// Section-shaped report payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportPayload {
    /// Numeric 1-5 ratings per item (psychiatric, behavioral)
    Ratings {
        /// Item to rating
        ratings: BTreeMap<String, u8>,
        /// Free-text notes
        notes: String,
    },
    /// Level labels per item (adl, risk)
    Levels {
        /// Item to level label
        levels: BTreeMap<String, String>,
        /// Free-text notes
        notes: String,
    },
    /// Per-activity attendance (therapeutic)
    Activities {
        /// Activity name to record
        activities: BTreeMap<String, ActivityRecord>,
        /// Free-text notes
        notes: String,
    },
}

/// Report document as stored under `reports/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Generated id of the client this report is about
    pub client_id: String,
    /// Client name, denormalized for list views
    pub client_name: String,
    /// Section tag
    pub section: ReportSection,
    /// Identity id of the submitter, empty when unknown
    pub submitted_by: String,
    /// Display name of the submitter
    pub submitted_by_name: String,
    /// Section payload
    pub payload: ReportPayload,
}
