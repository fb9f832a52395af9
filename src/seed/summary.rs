// ABOUTME: Outcome of a seeding run: ids written, counts per step, and skipped entities
// ABOUTME: Also renders the closing list of demo logins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use caretrack_core::models::StaffAccount;

/// Seeding step an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStep {
    /// Identities and profiles
    Staff,
    /// Organisation settings lists
    OrgConfig,
    /// Patient records
    Clients,
    /// Per-client diagnosis history
    DiagnosisHistory,
    /// Section reports
    Reports,
    /// Realtime chat messages
    Chat,
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Staff => "staff",
            Self::OrgConfig => "org config",
            Self::Clients => "clients",
            Self::DiagnosisHistory => "diagnosis history",
            Self::Reports => "reports",
            Self::Chat => "chat",
        };
        f.write_str(name)
    }
}

/// A per-entity failure that was logged and skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedWarning {
    /// Step that hit the failure
    pub step: SeedStep,
    /// The entity that was skipped (email, client name, channel...)
    pub entity: String,
    /// Underlying error message
    pub message: String,
}

impl fmt::Display for SeedWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.step, self.entity, self.message)
    }
}

/// What a seeding run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Identity id per staff email, for every identity created or found
    pub identities: BTreeMap<String, String>,
    /// Staff emails whose identity was newly created this run
    pub created_identities: Vec<String>,
    /// Profile documents written
    pub profiles_written: usize,
    /// Whether the org config write succeeded
    pub org_config_written: bool,
    /// Generated client ids, in template order
    pub client_ids: Vec<String>,
    /// Diagnosis history entries written
    pub diagnosis_entries: usize,
    /// Report documents written
    pub reports_written: usize,
    /// Chat messages appended
    pub chat_messages: usize,
    /// Whether the chat step was skipped because no realtime token was obtained
    pub chat_skipped: bool,
    /// Everything that was skipped
    pub warnings: Vec<SeedWarning>,
}

impl SeedSummary {
    pub(crate) fn warn(&mut self, step: SeedStep, entity: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(SeedWarning {
            step,
            entity: entity.into(),
            message: message.into(),
        });
    }

    /// Warnings raised by `step`
    pub fn warnings_for(&self, step: SeedStep) -> impl Iterator<Item = &SeedWarning> {
        self.warnings.iter().filter(move |w| w.step == step)
    }
}

/// Console lines listing the demo logins
#[must_use]
pub fn login_lines(staff: &[StaffAccount]) -> Vec<String> {
    let mut lines = Vec::with_capacity(staff.len() + 1);
    lines.push("Done. You can log in with:".to_owned());
    lines.extend(
        staff
            .iter()
            .map(|account| format!("   {}  /  {}", account.email, account.password)),
    );
    lines
}

/// Write the login list to `out`
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_logins(staff: &[StaffAccount], out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    for line in login_lines(staff) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
