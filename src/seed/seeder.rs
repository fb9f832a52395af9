// ABOUTME: The CareTrack seeding sequence: staff, org config, clients, history, reports, chat
// ABOUTME: Only the credential check is fatal; every later failure is logged and skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Seeder
//!
//! Steps run strictly in order and later steps use ids produced by earlier
//! ones:
//!
//! 1. staff identities (create, or look up on conflict) and their profiles
//! 2. the `config/org` settings lists (merge write)
//! 3. clients, capturing each generated id in template order
//! 4. one diagnosis history entry for each of the first two clients
//! 5. one report per client and section
//! 6. one chat message per channel, if a realtime token can be obtained
//!
//! Staff, profiles and the org config converge on re-runs. Clients, reports
//! and chat messages use generated ids, so every run adds a new set.

use std::collections::BTreeMap;

use caretrack_core::constants::{collections, documents, fields, limits};
use caretrack_core::errors::AppResult;
use caretrack_core::models::{
    ChatChannel, ChatMessage, Client, ClientTemplate, DiagnosisHistoryEntry, OrgConfig, Report,
    ReportPayload, ReportSection, StaffAccount,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::fixtures::SeedPlan;
use super::summary::{SeedStep, SeedSummary};
use crate::backend::{Backend, BackendConnector, Document};
use crate::config::SeedConfig;

/// Role whose holder records diagnosis history
pub const DOCTOR_ROLE: &str = "doctor";
/// Role whose holder files reports
pub const NURSE_ROLE: &str = "nurse";
/// Role used when the preferred staff member has no identity
pub const ADMIN_ROLE: &str = "admin";

/// Name on history entries not recorded by a doctor
pub const HISTORY_FALLBACK_NAME: &str = "Admin";
/// Name on reports not filed by a nurse
pub const REPORT_FALLBACK_NAME: &str = "Admin User";

/// Identity and display name a record is attributed to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    /// Identity id, empty when no identity is known
    pub uid: String,
    /// Display name
    pub name: String,
}

/// Attribute to the first staff member holding `role` that has an identity,
/// else to the first admin with `fallback_name`, else to nobody with `fallback_name`
#[must_use]
pub fn attribute(
    staff: &[StaffAccount],
    identities: &BTreeMap<String, String>,
    role: &str,
    fallback_name: &str,
) -> Attribution {
    let holder = |role: &str| {
        staff
            .iter()
            .filter(|account| account.roles.iter().any(|r| r == role))
            .find_map(|account| identities.get(&account.email).map(|uid| (account, uid)))
    };

    if let Some((account, uid)) = holder(role) {
        return Attribution {
            uid: uid.clone(),
            name: account.display_name.clone(),
        };
    }

    Attribution {
        uid: holder(ADMIN_ROLE)
            .map(|(_, uid)| uid.clone())
            .unwrap_or_default(),
        name: fallback_name.to_owned(),
    }
}

/// A client insert that succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededClient {
    /// Generated document id
    pub id: String,
    /// The record as written
    pub record: Client,
}

/// Runs the seeding steps against one backend
pub struct Seeder {
    backend: Backend,
}

impl Seeder {
    /// Seeder writing to `backend`
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Run every step of `plan` and report what was written
    pub async fn run(&self, plan: &SeedPlan) -> SeedSummary {
        let mut summary = SeedSummary::default();
        let now = Utc::now();

        info!("=== NeuroRehab CareTrack Seeder ===");

        info!("Step 1: Creating staff identities and profiles...");
        self.ensure_staff(&plan.staff, &mut summary).await;

        info!("Step 2: Writing organisation settings...");
        self.write_org_config(&plan.org_config, &mut summary).await;

        info!("Step 3: Adding clients...");
        let created_by = attribute(&plan.staff, &summary.identities, ADMIN_ROLE, "").uid;
        let clients = self
            .seed_clients(&plan.clients, &created_by, now, &mut summary)
            .await;

        info!("Step 4: Adding diagnosis history...");
        let doctor = attribute(
            &plan.staff,
            &summary.identities,
            DOCTOR_ROLE,
            HISTORY_FALLBACK_NAME,
        );
        self.seed_diagnosis_history(&clients, &doctor, &mut summary)
            .await;

        info!("Step 5: Filing reports...");
        let nurse = attribute(
            &plan.staff,
            &summary.identities,
            NURSE_ROLE,
            REPORT_FALLBACK_NAME,
        );
        self.seed_reports(&clients, &plan.report_payloads, &nurse, &mut summary)
            .await;

        info!("Step 6: Posting chat messages...");
        self.seed_chat(&plan.channels, &mut summary).await;

        info!(
            identities = summary.identities.len(),
            clients = summary.client_ids.len(),
            diagnosis_entries = summary.diagnosis_entries,
            reports = summary.reports_written,
            chat_messages = summary.chat_messages,
            warnings = summary.warnings.len(),
            "=== Seeding Complete ==="
        );
        summary
    }

    /// Create each identity, or look it up if it exists, then upsert its profile
    pub async fn ensure_staff(&self, staff: &[StaffAccount], summary: &mut SeedSummary) {
        for account in staff {
            let (uid, created) = match self
                .backend
                .identity
                .create_identity(&account.email, &account.password, &account.display_name)
                .await
            {
                Ok(uid) => (uid, true),
                Err(e) if e.is_already_exists() => {
                    match self
                        .backend
                        .identity
                        .lookup_identity_by_email(&account.email)
                        .await
                    {
                        Ok(uid) => (uid, false),
                        Err(e) => {
                            warn!(email = %account.email, error = %e, "Skip user");
                            summary.warn(SeedStep::Staff, &account.email, e.to_string());
                            continue;
                        }
                    }
                }
                Err(e) => {
                    warn!(email = %account.email, error = %e, "Skip user");
                    summary.warn(SeedStep::Staff, &account.email, e.to_string());
                    continue;
                }
            };

            summary
                .identities
                .insert(account.email.clone(), uid.clone());
            if created {
                summary.created_identities.push(account.email.clone());
            }

            match self.write_profile(account, &uid, created).await {
                Ok(()) if created => {
                    summary.profiles_written += 1;
                    info!(email = %account.email, uid = %uid, "Created user");
                }
                Ok(()) => {
                    summary.profiles_written += 1;
                    info!(
                        email = %account.email,
                        uid = %uid,
                        "Updated profile for existing user"
                    );
                }
                Err(e) => {
                    warn!(email = %account.email, uid = %uid, error = %e, "Profile write failed");
                    summary.warn(SeedStep::Staff, &account.email, e.to_string());
                }
            }
        }
    }

    async fn write_profile(
        &self,
        account: &StaffAccount,
        uid: &str,
        created: bool,
    ) -> AppResult<()> {
        let mut document = Document::from_model(&account.profile())?;
        if created {
            document = document.with_server_timestamp(fields::CREATED_AT);
        }
        document = document.with_server_timestamp(fields::UPDATED_AT);

        self.backend
            .documents
            .set_document(collections::USER_PROFILES, uid, document, true)
            .await
    }

    /// Merge the settings lists into the singleton config document
    pub async fn write_org_config(&self, config: &OrgConfig, summary: &mut SeedSummary) {
        let result = async {
            let document = Document::from_model(config)?;
            self.backend
                .documents
                .set_document(collections::CONFIG, documents::ORG_CONFIG, document, true)
                .await
        }
        .await;

        match result {
            Ok(()) => {
                summary.org_config_written = true;
                info!(
                    collection = collections::CONFIG,
                    document = documents::ORG_CONFIG,
                    "Wrote settings lists"
                );
            }
            Err(e) => {
                warn!(error = %e, "Org config write failed");
                summary.warn(SeedStep::OrgConfig, documents::ORG_CONFIG, e.to_string());
            }
        }
    }

    /// Insert every client and return the successful inserts in template order
    pub async fn seed_clients(
        &self,
        templates: &[ClientTemplate],
        created_by: &str,
        now: DateTime<Utc>,
        summary: &mut SeedSummary,
    ) -> Vec<SeededClient> {
        let mut seeded = Vec::with_capacity(templates.len());

        for template in templates {
            let record = template.materialize(now, created_by);
            let inserted = self
                .insert(
                    collections::CLIENTS,
                    &record,
                    &[fields::CREATED_AT, fields::UPDATED_AT],
                )
                .await;
            match inserted {
                Ok(id) => {
                    info!(client = %record.name, client_id = %id, "Added client");
                    summary.client_ids.push(id.clone());
                    seeded.push(SeededClient { id, record });
                }
                Err(e) => {
                    warn!(client = %record.name, error = %e, "Client insert failed");
                    summary.warn(SeedStep::Clients, &record.name, e.to_string());
                }
            }
        }

        seeded
    }

    /// One history entry for each of the first clients, recorded by `recorded_by`
    pub async fn seed_diagnosis_history(
        &self,
        clients: &[SeededClient],
        recorded_by: &Attribution,
        summary: &mut SeedSummary,
    ) {
        for client in clients.iter().take(limits::DIAGNOSIS_HISTORY_CLIENTS) {
            let entry = DiagnosisHistoryEntry {
                diagnosis: client.record.diagnosis.clone(),
                from_date: client.record.admission_date.clone(),
                added_by: recorded_by.uid.clone(),
                added_by_name: recorded_by.name.clone(),
            };
            let path = collections::subcollection(
                collections::CLIENTS,
                &client.id,
                collections::DIAGNOSIS_HISTORY,
            );

            match self.insert(&path, &entry, &[fields::CREATED_AT]).await {
                Ok(_) => summary.diagnosis_entries += 1,
                Err(e) => {
                    warn!(client_id = %client.id, error = %e, "Diagnosis history insert failed");
                    summary.warn(SeedStep::DiagnosisHistory, &client.id, e.to_string());
                }
            }
        }
        info!(
            count = summary.diagnosis_entries,
            "Added diagnosis history"
        );
    }

    /// One report per client and section, filed by `filed_by`
    pub async fn seed_reports(
        &self,
        clients: &[SeededClient],
        payloads: &[(ReportSection, ReportPayload)],
        filed_by: &Attribution,
        summary: &mut SeedSummary,
    ) {
        for client in clients {
            for (section, payload) in payloads {
                let report = Report {
                    client_id: client.id.clone(),
                    client_name: client.record.name.clone(),
                    section: *section,
                    submitted_by: filed_by.uid.clone(),
                    submitted_by_name: filed_by.name.clone(),
                    payload: payload.clone(),
                };

                let inserted = self
                    .insert(collections::REPORTS, &report, &[fields::CREATED_AT])
                    .await;
                match inserted {
                    Ok(_) => summary.reports_written += 1,
                    Err(e) => {
                        warn!(
                            client_id = %client.id,
                            section = %section,
                            error = %e,
                            "Report insert failed"
                        );
                        summary.warn(
                            SeedStep::Reports,
                            format!("{}/{section}", client.id),
                            e.to_string(),
                        );
                    }
                }
            }
        }
        info!(count = summary.reports_written, "Added reports for all clients x sections");
    }

    /// Append a seed message to every channel; skipped if no realtime token
    pub async fn seed_chat(&self, channels: &[ChatChannel], summary: &mut SeedSummary) {
        let token = match self.backend.realtime.access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Realtime skip (no chat seed)");
                summary.chat_skipped = true;
                summary.warn(SeedStep::Chat, "realtime token", e.to_string());
                return;
            }
        };

        for channel in channels {
            let message = ChatMessage::seed_for(channel, Utc::now().timestamp_millis());
            let result = async {
                let body = serde_json::to_value(&message)?;
                self.backend.realtime.push(&token, &channel.path(), &body).await
            }
            .await;

            match result {
                Ok(()) => {
                    summary.chat_messages += 1;
                    info!(channel = %channel.name, "Realtime message added");
                }
                Err(e) => {
                    warn!(channel = %channel.name, error = %e, "Realtime message failed");
                    summary.warn(SeedStep::Chat, &channel.name, e.to_string());
                }
            }
        }
    }

    async fn insert<T: serde::Serialize>(
        &self,
        collection: &str,
        model: &T,
        server_timestamps: &[&str],
    ) -> AppResult<String> {
        let document = server_timestamps
            .iter()
            .fold(Document::from_model(model)?, |doc, field| {
                doc.with_server_timestamp(field)
            });
        self.backend.documents.add_document(collection, document).await
    }
}

/// Check the credential, connect, and run `plan`
///
/// The connector is only invoked once the credential file is known to exist.
///
/// # Errors
///
/// Returns `ConfigMissing` if the credential file does not exist and
/// `ConfigInvalid` if the connector cannot use it. Nothing after the connect
/// is fatal.
pub async fn run(
    config: &SeedConfig,
    connector: &dyn BackendConnector,
    plan: &SeedPlan,
) -> AppResult<SeedSummary> {
    let credential = config.resolve_credential()?;
    let backend = connector.connect(credential).await?;
    Ok(Seeder::new(backend).run(plan).await)
}
