// ABOUTME: In-memory implementation of every backend seam with Firebase-like semantics
// ABOUTME: Clones share one state so tests can run the seeder twice and inspect the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! In-memory backend
//!
//! Mirrors what the seeder relies on from Firebase:
//!
//! - creating an identity for a known email fails with `ResourceAlreadyExists`
//! - merge writes keep fields they do not mention; plain writes replace
//! - inserts get fresh ids; server timestamps become the current time
//!
//! Every backend call (including token exchanges and connects) is counted.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use caretrack_core::errors::{AppError, AppResult};
use chrono::{Duration, Utc};
use serde_json::{Map, Value};

use super::{Backend, BackendConnector, Document, DocumentStore, IdentityProvider, RealtimeStore};
use crate::firebase::token::AccessToken;

/// A stored identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryIdentity {
    /// Assigned id
    pub uid: String,
    /// Login email
    pub email: String,
    /// Display name given at creation
    pub display_name: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    identities: BTreeMap<String, MemoryIdentity>,
    collections: BTreeMap<String, BTreeMap<String, Map<String, Value>>>,
    insertion_order: BTreeMap<String, Vec<String>>,
    realtime: BTreeMap<String, Vec<Value>>,
    next_id: u64,
    calls: usize,
    connects: usize,
    fail_realtime_auth: bool,
    failing_emails: HashSet<String>,
    failing_lookups: HashSet<String>,
    failing_collections: HashSet<String>,
}

impl MemoryState {
    fn generate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:04}", self.next_id)
    }
}

/// Shared in-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    /// Empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bundle this backend as the three seams
    #[must_use]
    pub fn backend(&self) -> Backend {
        Backend {
            identity: Arc::new(self.clone()),
            documents: Arc::new(self.clone()),
            realtime: Arc::new(self.clone()),
        }
    }

    /// Make every realtime token exchange fail
    pub fn fail_realtime_auth(&self) {
        self.lock().fail_realtime_auth = true;
    }

    /// Make identity creation for `email` fail with a non-conflict error
    pub fn fail_identity_creation(&self, email: &str) {
        self.lock().failing_emails.insert(email.to_owned());
    }

    /// Make lookups of `email` fail even when the identity exists
    pub fn fail_identity_lookup(&self, email: &str) {
        self.lock().failing_lookups.insert(email.to_owned());
    }

    /// Make every write to `collection` fail
    pub fn fail_collection(&self, collection: &str) {
        self.lock().failing_collections.insert(collection.to_owned());
    }

    /// Store a document directly, bypassing call counting
    pub fn put_document(&self, collection: &str, document_id: &str, fields: Map<String, Value>) {
        let mut state = self.lock();
        state
            .insertion_order
            .entry(collection.to_owned())
            .or_default()
            .push(document_id.to_owned());
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(document_id.to_owned(), fields);
    }

    /// Number of identities
    #[must_use]
    pub fn identity_count(&self) -> usize {
        self.lock().identities.len()
    }

    /// Identity registered under `email`
    #[must_use]
    pub fn identity(&self, email: &str) -> Option<MemoryIdentity> {
        self.lock().identities.get(email).cloned()
    }

    /// Stored fields of `collection/document_id`
    #[must_use]
    pub fn document(&self, collection: &str, document_id: &str) -> Option<Map<String, Value>> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(document_id))
            .cloned()
    }

    /// Every document in `collection`, in insertion order
    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<(String, Map<String, Value>)> {
        let state = self.lock();
        let Some(docs) = state.collections.get(collection) else {
            return Vec::new();
        };
        state
            .insertion_order
            .get(collection)
            .into_iter()
            .flatten()
            .filter_map(|id| docs.get(id).map(|fields| (id.clone(), fields.clone())))
            .collect()
    }

    /// Collection paths that hold at least one document
    #[must_use]
    pub fn collection_paths(&self) -> Vec<String> {
        self.lock()
            .collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Children appended under a realtime path
    #[must_use]
    pub fn realtime_children(&self, path: &str) -> Vec<Value> {
        self.lock().realtime.get(path).cloned().unwrap_or_default()
    }

    /// Backend calls made so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    /// Times a connector handed out this backend
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.lock().connects
    }
}

fn materialize(document: Document) -> Map<String, Value> {
    let now = Value::String(Utc::now().to_rfc3339());
    let mut fields = document.fields().clone();
    for field in document.server_timestamps() {
        fields.insert(field.clone(), now.clone());
    }
    fields
}

#[async_trait]
impl IdentityProvider for MemoryBackend {
    async fn create_identity(
        &self,
        email: &str,
        _password: &str,
        display_name: &str,
    ) -> AppResult<String> {
        let mut state = self.lock();
        state.calls += 1;

        if state.failing_emails.contains(email) {
            return Err(AppError::external_service(
                "identity",
                format!("INVALID_EMAIL: {email}"),
            ));
        }
        if state.identities.contains_key(email) {
            return Err(AppError::already_exists(format!("identity {email}")));
        }

        let uid = state.generate_id("uid");
        state.identities.insert(
            email.to_owned(),
            MemoryIdentity {
                uid: uid.clone(),
                email: email.to_owned(),
                display_name: display_name.to_owned(),
            },
        );
        drop(state);
        Ok(uid)
    }

    async fn lookup_identity_by_email(&self, email: &str) -> AppResult<String> {
        let mut state = self.lock();
        state.calls += 1;
        if state.failing_lookups.contains(email) {
            return Err(AppError::external_service(
                "identity",
                format!("lookup failed for {email}"),
            ));
        }
        state
            .identities
            .get(email)
            .map(|identity| identity.uid.clone())
            .ok_or_else(|| AppError::not_found(format!("identity {email}")))
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        document: Document,
        merge: bool,
    ) -> AppResult<()> {
        let mut state = self.lock();
        state.calls += 1;
        if state.failing_collections.contains(collection) {
            return Err(AppError::external_service("documents", "PERMISSION_DENIED"));
        }

        let incoming = materialize(document);
        let is_new = !state
            .collections
            .get(collection)
            .is_some_and(|docs| docs.contains_key(document_id));
        if is_new {
            state
                .insertion_order
                .entry(collection.to_owned())
                .or_default()
                .push(document_id.to_owned());
        }

        let stored = state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .entry(document_id.to_owned())
            .or_default();
        if merge {
            stored.extend(incoming);
        } else {
            *stored = incoming;
        }
        drop(state);
        Ok(())
    }

    async fn add_document(&self, collection: &str, document: Document) -> AppResult<String> {
        let mut state = self.lock();
        state.calls += 1;
        if state.failing_collections.contains(collection) {
            return Err(AppError::external_service("documents", "PERMISSION_DENIED"));
        }

        let id = state.generate_id("doc");
        state
            .insertion_order
            .entry(collection.to_owned())
            .or_default()
            .push(id.clone());
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), materialize(document));
        drop(state);
        Ok(id)
    }
}

#[async_trait]
impl RealtimeStore for MemoryBackend {
    async fn access_token(&self) -> AppResult<AccessToken> {
        let mut state = self.lock();
        state.calls += 1;
        if state.fail_realtime_auth {
            return Err(AppError::external_auth(
                "token exchange",
                "invalid_grant: account not found",
            ));
        }
        drop(state);
        Ok(AccessToken::new(
            "memory-realtime-token",
            Utc::now() + Duration::hours(1),
        ))
    }

    async fn push(&self, _token: &AccessToken, path: &str, body: &Value) -> AppResult<()> {
        let mut state = self.lock();
        state.calls += 1;
        state
            .realtime
            .entry(path.to_owned())
            .or_default()
            .push(body.clone());
        drop(state);
        Ok(())
    }
}

#[async_trait]
impl BackendConnector for MemoryBackend {
    async fn connect(&self, _credential_path: &Path) -> AppResult<Backend> {
        self.lock().connects += 1;
        Ok(self.backend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caretrack_core::errors::ErrorCode;
    use serde_json::json;

    fn doc(value: &Value) -> Document {
        Document::from_model(value).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_identity_is_a_conflict() {
        let backend = MemoryBackend::new();
        let uid = backend.create_identity("a@x.com", "P1", "A").await.unwrap();

        let error = backend.create_identity("a@x.com", "P1", "A").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
        assert_eq!(backend.lookup_identity_by_email("a@x.com").await.unwrap(), uid);
        assert_eq!(backend.identity_count(), 1);
    }

    #[tokio::test]
    async fn test_merge_keeps_unmentioned_fields() {
        let backend = MemoryBackend::new();
        backend
            .set_document("config", "org", doc(&json!({"a": 1, "b": 2})), false)
            .await
            .unwrap();
        backend
            .set_document("config", "org", doc(&json!({"b": 3})), true)
            .await
            .unwrap();
        assert_eq!(
            Value::Object(backend.document("config", "org").unwrap()),
            json!({"a": 1, "b": 3})
        );

        backend
            .set_document("config", "org", doc(&json!({"c": 4})), false)
            .await
            .unwrap();
        assert_eq!(
            Value::Object(backend.document("config", "org").unwrap()),
            json!({"c": 4})
        );
    }

    #[tokio::test]
    async fn test_inserts_keep_order_and_fill_timestamps() {
        let backend = MemoryBackend::new();
        let first = backend
            .add_document("clients", doc(&json!({"n": 1})).with_server_timestamp("createdAt"))
            .await
            .unwrap();
        let second = backend.add_document("clients", doc(&json!({"n": 2}))).await.unwrap();

        let stored = backend.documents("clients");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].0, first);
        assert_eq!(stored[1].0, second);
        assert!(stored[0].1["createdAt"].is_string());
        assert_eq!(backend.call_count(), 2);
    }
}
