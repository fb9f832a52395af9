// ABOUTME: Patient ("client") records, their stay windows, and diagnosis history entries
// ABOUTME: Templates carry relative stay offsets that become calendar dates at seeding time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::stay;

/// Admission state of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Currently admitted
    Active,
    /// Discharged
    Discharged,
}

/// Current risk rating shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// High risk
    High,
    /// Medium risk
    Medium,
    /// Low risk
    Low,
    /// No identified risk
    None,
}

/// Admission/discharge offsets in days relative to the seeding day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPlan {
    /// Days before today the client was admitted
    pub admitted_days_ago: i64,
    /// Days after today the discharge is planned
    pub discharge_in_days: i64,
}

impl StayPlan {
    /// Admitted 30 days ago, discharge in 30 days
    pub const LONG: Self = Self {
        admitted_days_ago: stay::LONG_ADMITTED_DAYS_AGO,
        discharge_in_days: stay::LONG_DISCHARGE_IN_DAYS,
    };

    /// Admitted 14 days ago, discharge in 15 days
    pub const SHORT: Self = Self {
        admitted_days_ago: stay::SHORT_ADMITTED_DAYS_AGO,
        discharge_in_days: stay::SHORT_DISCHARGE_IN_DAYS,
    };

    /// Admission date as `YYYY-MM-DD`
    #[must_use]
    pub fn admission_date(&self, now: DateTime<Utc>) -> String {
        (now - Duration::days(self.admitted_days_ago))
            .format(stay::DATE_FORMAT)
            .to_string()
    }

    /// Planned discharge date as `YYYY-MM-DD`
    #[must_use]
    pub fn planned_discharge_date(&self, now: DateTime<Utc>) -> String {
        (now + Duration::days(self.discharge_in_days))
            .format(stay::DATE_FORMAT)
            .to_string()
    }
}

/// A client to seed, before dates and the creator are filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTemplate {
    /// Full name
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`
    pub dob: String,
    /// Gender label
    pub gender: String,
    /// Primary diagnosis
    pub diagnosis: String,
    /// Stay window
    pub stay: StayPlan,
    /// Risk rating
    pub current_risk: RiskLevel,
    /// Staff display name the client is assigned to
    pub assigned_therapist: String,
    /// Ward name
    pub ward: String,
    /// Room/bed identifier
    pub room_number: String,
}

impl ClientTemplate {
    /// Fill in dates relative to `now` and the creating identity
    #[must_use]
    pub fn materialize(&self, now: DateTime<Utc>, created_by: &str) -> Client {
        Client {
            name: self.name.clone(),
            dob: self.dob.clone(),
            gender: self.gender.clone(),
            diagnosis: self.diagnosis.clone(),
            admission_date: self.stay.admission_date(now),
            planned_discharge_date: self.stay.planned_discharge_date(now),
            status: ClientStatus::Active,
            current_risk: self.current_risk,
            assigned_therapist: self.assigned_therapist.clone(),
            ward: self.ward.clone(),
            room_number: self.room_number.clone(),
            created_by: created_by.to_owned(),
        }
    }
}

/// Client document as stored under `clients/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Full name
    pub name: String,
    /// Date of birth
    pub dob: String,
    /// Gender label
    pub gender: String,
    /// Primary diagnosis
    pub diagnosis: String,
    /// Admission date
    pub admission_date: String,
    /// Planned discharge date
    pub planned_discharge_date: String,
    /// Admission state
    pub status: ClientStatus,
    /// Risk rating
    pub current_risk: RiskLevel,
    /// Assigned staff display name
    pub assigned_therapist: String,
    /// Ward name
    pub ward: String,
    /// Room/bed identifier
    pub room_number: String,
    /// Identity id of the creating staff member, empty when unknown
    pub created_by: String,
}

/// Entry under `clients/{id}/diagnosisHistory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisHistoryEntry {
    /// Diagnosis label
    pub diagnosis: String,
    /// Date the diagnosis took effect
    pub from_date: String,
    /// Identity id of the recording staff member, empty when unknown
    pub added_by: String,
    /// Display name of the recording staff member
    pub added_by_name: String,
}
