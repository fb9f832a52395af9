// ABOUTME: Integration tests for the seeding sequence against the in-memory backend
// ABOUTME: Covers idempotent staff upserts, merge writes, id ordering, and skip-on-failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeSet;

use caretrack_seed::backend::{IdentityProvider, MemoryBackend};
use caretrack_seed::config::SeedConfig;
use caretrack_seed::constants::{collections, stay};
use caretrack_seed::errors::ErrorCode;
use caretrack_seed::seed::{self, SeedPlan, SeedStep, Seeder};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;

use common::{init_test_logging, single_admin_plan};

async fn seed_with(backend: &MemoryBackend, plan: &SeedPlan) -> seed::SeedSummary {
    init_test_logging();
    Seeder::new(backend.backend()).run(plan).await
}

fn history_path(client_id: &str) -> String {
    collections::subcollection(collections::CLIENTS, client_id, collections::DIAGNOSIS_HISTORY)
}

#[tokio::test]
async fn test_rerun_resolves_existing_identity() {
    let backend = MemoryBackend::new();
    let plan = single_admin_plan();

    let first = seed_with(&backend, &plan).await;
    let second = seed_with(&backend, &plan).await;

    assert_eq!(backend.identity_count(), 1);
    assert_eq!(first.identities["a@x.com"], second.identities["a@x.com"]);
    assert_eq!(first.created_identities, vec!["a@x.com".to_owned()]);
    assert!(second.created_identities.is_empty());
    assert!(second.warnings_for(SeedStep::Staff).next().is_none());
}

#[tokio::test]
async fn test_single_admin_scenario() {
    let backend = MemoryBackend::new();
    let summary = seed_with(&backend, &single_admin_plan()).await;

    let identity = backend.identity("a@x.com").unwrap();
    assert_eq!(backend.identity_count(), 1);
    assert_eq!(identity.display_name, "A");

    let profiles = backend.documents(collections::USER_PROFILES);
    assert_eq!(profiles.len(), 1);
    let (uid, profile) = &profiles[0];
    assert_eq!(uid, &summary.identities["a@x.com"]);
    assert_eq!(profile["role"], "admin");
    assert_eq!(profile["roles"], json!(["admin"]));
    assert_eq!(profile["isActive"], true);
    assert_eq!(profile["email"], "a@x.com");
    assert!(profile.contains_key("createdAt"));
    assert!(profile.contains_key("updatedAt"));
}

#[tokio::test]
async fn test_profile_refresh_keeps_created_at() {
    let backend = MemoryBackend::new();
    let plan = single_admin_plan();

    let summary = seed_with(&backend, &plan).await;
    let uid = summary.identities["a@x.com"].clone();
    let created_at =
        backend.document(collections::USER_PROFILES, &uid).unwrap()["createdAt"].clone();

    seed_with(&backend, &plan).await;
    let profile = backend.document(collections::USER_PROFILES, &uid).unwrap();

    assert_eq!(profile["createdAt"], created_at);
    assert!(profile["updatedAt"].is_string());
}

#[tokio::test]
async fn test_org_config_merge_preserves_unrelated_fields() {
    let backend = MemoryBackend::new();
    let mut existing = serde_json::Map::new();
    existing.insert("customField".to_owned(), json!("keep me"));
    existing.insert("wardNames".to_owned(), json!(["Old Ward"]));
    backend.put_document("config", "org", existing);

    let summary = seed_with(&backend, &SeedPlan::demo()).await;
    let config = backend.document("config", "org").unwrap();

    assert!(summary.org_config_written);
    assert_eq!(config["customField"], "keep me");
    assert_eq!(config["wardNames"][0], "Ward A");
    for field in caretrack_seed::models::OrgConfig::field_names() {
        assert!(config.contains_key(field), "missing {field}");
    }
}

#[tokio::test]
async fn test_four_clients_keep_template_order() {
    let backend = MemoryBackend::new();
    let plan = SeedPlan::demo();
    let summary = seed_with(&backend, &plan).await;

    assert_eq!(summary.client_ids.len(), 4);
    let stored = backend.documents(collections::CLIENTS);
    let stored_ids: Vec<&String> = stored.iter().map(|(id, _)| id).collect();
    let expected_ids: Vec<&String> = summary.client_ids.iter().collect();
    assert_eq!(stored_ids, expected_ids);

    let names: Vec<&Value> = stored.iter().map(|(_, doc)| &doc["name"]).collect();
    let template_names: Vec<Value> = plan.clients.iter().map(|c| json!(c.name)).collect();
    assert_eq!(names, template_names.iter().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_client_fields_are_derived_at_seed_time() {
    let backend = MemoryBackend::new();
    let summary = seed_with(&backend, &SeedPlan::demo()).await;
    let admin_uid = &summary.identities["admin@neurorehab.demo"];
    let alice = backend
        .document(collections::CLIENTS, &summary.client_ids[0])
        .unwrap();

    let now = Utc::now();
    let expected_admission = (now - Duration::days(30)).format(stay::DATE_FORMAT).to_string();
    let expected_discharge = (now + Duration::days(30)).format(stay::DATE_FORMAT).to_string();

    assert_eq!(alice["admissionDate"], json!(expected_admission));
    assert_eq!(alice["plannedDischargeDate"], json!(expected_discharge));
    assert_eq!(alice["status"], "active");
    assert_eq!(alice["currentRisk"], "high");
    assert_eq!(&alice["createdBy"], &json!(admin_uid));
    assert!(alice.contains_key("createdAt"));
    assert!(alice.contains_key("updatedAt"));
}

#[tokio::test]
async fn test_history_only_for_first_two_clients() {
    let backend = MemoryBackend::new();
    let mut plan = SeedPlan::demo();
    let extra = plan.clients.clone();
    plan.clients.extend(extra);

    let summary = seed_with(&backend, &plan).await;
    let doctor_uid = &summary.identities["doctor@neurorehab.demo"];

    assert_eq!(summary.client_ids.len(), 8);
    assert_eq!(summary.diagnosis_entries, 2);
    for (index, client_id) in summary.client_ids.iter().enumerate() {
        let entries = backend.documents(&history_path(client_id));
        if index < 2 {
            assert_eq!(entries.len(), 1);
            let entry = &entries[0].1;
            assert_eq!(&entry["addedBy"], &json!(doctor_uid));
            assert_eq!(entry["addedByName"], "Dr. Smith");
            assert_eq!(entry["diagnosis"], json!(plan.clients[index].diagnosis));
        } else {
            assert!(entries.is_empty());
        }
    }

    let history_paths: BTreeSet<String> = backend
        .collection_paths()
        .into_iter()
        .filter(|path| path.ends_with(collections::DIAGNOSIS_HISTORY))
        .collect();
    let expected: BTreeSet<String> = summary.client_ids[..2]
        .iter()
        .map(|id| history_path(id))
        .collect();
    assert_eq!(history_paths, expected);
}

#[tokio::test]
async fn test_reports_cover_every_client_and_section() {
    let backend = MemoryBackend::new();
    let summary = seed_with(&backend, &SeedPlan::demo()).await;
    let nurse_uid = &summary.identities["nurse@neurorehab.demo"];

    let reports = backend.documents(collections::REPORTS);
    assert_eq!(summary.reports_written, 20);
    assert_eq!(reports.len(), 20);

    for client_id in &summary.client_ids {
        let sections: BTreeSet<String> = reports
            .iter()
            .filter(|(_, r)| r["clientId"] == json!(client_id))
            .map(|(_, r)| r["section"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(sections.len(), 5);
    }
    assert!(reports.iter().all(|(_, r)| r["submittedByName"] == "Nurse Jane"));
    assert!(reports.iter().all(|(_, r)| r["submittedBy"] == json!(nurse_uid)));
    assert!(reports.iter().all(|(_, r)| r["payload"]["notes"].is_string()));
}

#[tokio::test]
async fn test_failed_identity_is_skipped_and_attribution_falls_back() {
    let backend = MemoryBackend::new();
    backend.fail_identity_creation("nurse@neurorehab.demo");

    let summary = seed_with(&backend, &SeedPlan::demo()).await;
    let admin_uid = &summary.identities["admin@neurorehab.demo"];

    assert_eq!(backend.identity_count(), 3);
    assert!(!summary.identities.contains_key("nurse@neurorehab.demo"));
    let staff_warnings: Vec<_> = summary.warnings_for(SeedStep::Staff).collect();
    assert_eq!(staff_warnings.len(), 1);
    assert_eq!(staff_warnings[0].entity, "nurse@neurorehab.demo");
    assert_eq!(backend.documents(collections::USER_PROFILES).len(), 3);

    let reports = backend.documents(collections::REPORTS);
    assert_eq!(reports.len(), 20);
    assert!(reports.iter().all(|(_, r)| r["submittedByName"] == "Admin User"));
    assert!(reports.iter().all(|(_, r)| r["submittedBy"] == json!(admin_uid)));
}

#[tokio::test]
async fn test_failed_lookup_of_existing_identity_is_skipped() {
    let backend = MemoryBackend::new();
    let existing_uid = backend
        .create_identity("nurse@neurorehab.demo", "secret", "Nurse Joy")
        .await
        .unwrap();
    backend.fail_identity_lookup("nurse@neurorehab.demo");

    let summary = seed_with(&backend, &SeedPlan::demo()).await;

    assert!(!summary.identities.contains_key("nurse@neurorehab.demo"));
    assert!(!summary
        .created_identities
        .contains(&"nurse@neurorehab.demo".to_owned()));
    assert!(backend
        .document(collections::USER_PROFILES, &existing_uid)
        .is_none());
    assert_eq!(backend.documents(collections::USER_PROFILES).len(), 3);

    let staff_warnings: Vec<_> = summary.warnings_for(SeedStep::Staff).collect();
    assert_eq!(staff_warnings.len(), 1);
    assert_eq!(staff_warnings[0].entity, "nurse@neurorehab.demo");

    assert_eq!(summary.client_ids.len(), 4);
    assert_eq!(backend.documents(collections::REPORTS).len(), 20);
    assert_eq!(backend.realtime_children("chat/Urgent_Alerts").len(), 1);
}

#[tokio::test]
async fn test_no_identities_leaves_attribution_empty() {
    let backend = MemoryBackend::new();
    let plan = SeedPlan::demo().with_staff(Vec::new());

    let summary = seed_with(&backend, &plan).await;

    let history = backend.documents(&history_path(&summary.client_ids[0]));
    assert_eq!(history[0].1["addedBy"], "");
    assert_eq!(history[0].1["addedByName"], "Admin");
    let client = backend
        .document(collections::CLIENTS, &summary.client_ids[0])
        .unwrap();
    assert_eq!(client["createdBy"], "");
}

#[tokio::test]
async fn test_failed_collection_does_not_abort_later_steps() {
    let backend = MemoryBackend::new();
    backend.fail_collection(collections::REPORTS);

    let summary = seed_with(&backend, &SeedPlan::demo()).await;

    assert_eq!(summary.reports_written, 0);
    assert_eq!(summary.warnings_for(SeedStep::Reports).count(), 20);
    assert_eq!(summary.chat_messages, 2);
    assert_eq!(summary.client_ids.len(), 4);
}

#[tokio::test]
async fn test_failed_client_insert_produces_no_id() {
    let backend = MemoryBackend::new();
    backend.fail_collection(collections::CLIENTS);

    let summary = seed_with(&backend, &SeedPlan::demo()).await;

    assert!(summary.client_ids.is_empty());
    assert_eq!(summary.warnings_for(SeedStep::Clients).count(), 4);
    assert_eq!(summary.diagnosis_entries, 0);
    assert_eq!(summary.reports_written, 0);
}

#[tokio::test]
async fn test_chat_appends_one_message_per_channel() {
    let backend = MemoryBackend::new();
    let summary = seed_with(&backend, &SeedPlan::demo()).await;

    assert_eq!(summary.chat_messages, 2);
    assert!(!summary.chat_skipped);

    let general = backend.realtime_children("chat/General_Ward");
    let urgent = backend.realtime_children("chat/Urgent_Alerts");
    assert_eq!(general.len(), 1);
    assert_eq!(urgent.len(), 1);
    assert_eq!(general[0]["text"], "Seed message for General Ward");
    assert_eq!(general[0]["sender"], "System");
    assert_eq!(general[0]["isUrgent"], false);
    assert_eq!(urgent[0]["isUrgent"], true);
    assert!(urgent[0]["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_chat_skipped_when_realtime_token_fails() {
    let backend = MemoryBackend::new();
    backend.fail_realtime_auth();

    let summary = seed_with(&backend, &SeedPlan::demo()).await;

    assert!(summary.chat_skipped);
    assert_eq!(summary.chat_messages, 0);
    assert!(backend.realtime_children("chat/General_Ward").is_empty());
    assert_eq!(summary.warnings_for(SeedStep::Chat).count(), 1);
    assert_eq!(summary.reports_written, 20);
}

#[tokio::test]
async fn test_rerun_duplicates_generated_records() {
    let backend = MemoryBackend::new();
    let plan = SeedPlan::demo();

    seed_with(&backend, &plan).await;
    seed_with(&backend, &plan).await;

    assert_eq!(backend.identity_count(), 4);
    assert_eq!(backend.documents(collections::USER_PROFILES).len(), 4);
    assert_eq!(backend.documents(collections::CLIENTS).len(), 8);
    assert_eq!(backend.documents(collections::REPORTS).len(), 40);
    assert_eq!(backend.realtime_children("chat/Urgent_Alerts").len(), 2);
}

#[tokio::test]
async fn test_missing_key_file_stops_before_any_backend_call() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let config = SeedConfig::new(dir.path().join("missing.json"));
    let backend = MemoryBackend::new();

    let error = seed::run(&config, &backend, &SeedPlan::demo())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.code.is_fatal());
    assert_eq!(backend.connect_count(), 0);
    assert_eq!(backend.call_count(), 0);
    assert_eq!(backend.identity_count(), 0);
}

#[tokio::test]
async fn test_present_key_file_connects_and_seeds() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let key_file = dir.path().join("key.json");
    std::fs::write(&key_file, "{}").unwrap();
    let backend = MemoryBackend::new();

    let summary = seed::run(&SeedConfig::new(key_file.clone()), &backend, &single_admin_plan())
        .await
        .unwrap();

    assert_eq!(backend.connect_count(), 1);
    assert_eq!(summary.identities.len(), 1);
    assert_eq!(summary.client_ids.len(), 4);
}
