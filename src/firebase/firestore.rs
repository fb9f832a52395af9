// ABOUTME: Cloud Firestore REST client writing documents through the commit endpoint
// ABOUTME: Encodes JSON into Firestore typed values and applies server-timestamp transforms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Firestore writes
//!
//! Every write is a single-entry `documents:commit`:
//!
//! - merge writes send an `updateMask` with exactly the written fields
//! - replace writes send no mask, so unmentioned fields are removed
//! - inserts generate a 20-character id locally (as the client SDKs do) and
//!   guard it with `currentDocument.exists = false`
//! - `createdAt`/`updatedAt` become `setToServerValue: REQUEST_TIME` transforms

use std::sync::Arc;

use async_trait::async_trait;
use caretrack_core::errors::{AppError, AppResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::token::ServiceAccountAuth;
use crate::backend::{Document, DocumentStore};

/// Database every CareTrack project uses
pub const DEFAULT_DATABASE: &str = "(default)";

/// Length of generated document ids
const AUTO_ID_LENGTH: usize = 20;

/// How a commit write treats the existing document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Update only the written fields
    Merge,
    /// Replace the whole document
    Replace,
    /// Create; fail if the document exists
    Create,
}

/// Encode a JSON value as a Firestore `Value`
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Encode a field map as Firestore `fields`
#[must_use]
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

/// Field path for a top-level field, backtick-quoted unless it is a plain identifier
#[must_use]
pub fn field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_owned()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

/// Random document id in the client SDKs' alphabet
#[must_use]
pub fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// One entry of a commit's `writes` array
#[must_use]
pub fn commit_write(document_name: &str, document: &Document, mode: WriteMode) -> Value {
    let mut write = Map::new();
    write.insert(
        "update".to_owned(),
        json!({ "name": document_name, "fields": encode_fields(document.fields()) }),
    );

    match mode {
        WriteMode::Merge => {
            let paths: Vec<String> = document.fields().keys().map(|k| field_path(k)).collect();
            write.insert("updateMask".to_owned(), json!({ "fieldPaths": paths }));
        }
        WriteMode::Create => {
            write.insert("currentDocument".to_owned(), json!({ "exists": false }));
        }
        WriteMode::Replace => {}
    }

    if !document.server_timestamps().is_empty() {
        let transforms: Vec<Value> = document
            .server_timestamps()
            .iter()
            .map(|f| json!({ "fieldPath": field_path(f), "setToServerValue": "REQUEST_TIME" }))
            .collect();
        write.insert("updateTransforms".to_owned(), Value::Array(transforms));
    }

    Value::Object(write)
}

/// Collection paths alternate collection/document segments and end on a collection
fn validate_collection_path(collection: &str) -> AppResult<()> {
    let segments: Vec<&str> = collection.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) || segments.len() % 2 == 0 {
        return Err(AppError::invalid_input(format!(
            "'{collection}' is not a collection path"
        )));
    }
    Ok(())
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    status: String,
}

/// Firestore client over the v1 REST API
pub struct FirestoreClient {
    http_client: Client,
    auth: Arc<ServiceAccountAuth>,
    base_url: String,
    project_id: String,
}

impl FirestoreClient {
    /// Create a client for the project's default database
    #[must_use]
    pub fn new(
        http_client: Client,
        auth: Arc<ServiceAccountAuth>,
        base_url: &str,
        project_id: &str,
    ) -> Self {
        Self {
            http_client,
            auth,
            base_url: base_url.trim_end_matches('/').to_owned(),
            project_id: project_id.to_owned(),
        }
    }

    /// Resource name of `collection/document_id`
    #[must_use]
    pub fn document_name(&self, collection: &str, document_id: &str) -> String {
        format!(
            "projects/{}/databases/{DEFAULT_DATABASE}/documents/{collection}/{document_id}",
            self.project_id
        )
    }

    /// URL of the commit endpoint
    #[must_use]
    pub fn commit_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{DEFAULT_DATABASE}/documents:commit",
            self.base_url, self.project_id
        )
    }

    async fn commit(&self, document_name: &str, write: Value) -> AppResult<()> {
        let token = self.auth.access_token().await?;
        let response = self
            .http_client
            .post(self.commit_url())
            .bearer_auth(token.secret())
            .json(&json!({ "writes": [write] }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(document = %document_name, "Firestore write committed");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(envelope) if envelope.error.status == "ALREADY_EXISTS" => {
                AppError::already_exists(document_name)
            }
            Ok(envelope) => AppError::external_service(
                "firestore",
                format!("{} ({})", envelope.error.message, envelope.error.status),
            ),
            Err(_) => AppError::external_service("firestore", format!("HTTP {status}")),
        };
        Err(error.with_resource_id(document_name))
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        document: Document,
        merge: bool,
    ) -> AppResult<()> {
        validate_collection_path(collection)?;
        let name = self.document_name(collection, document_id);
        let mode = if merge {
            WriteMode::Merge
        } else {
            WriteMode::Replace
        };
        self.commit(&name, commit_write(&name, &document, mode)).await
    }

    async fn add_document(&self, collection: &str, document: Document) -> AppResult<String> {
        validate_collection_path(collection)?;
        let id = auto_id();
        let name = self.document_name(collection, &id);
        self.commit(&name, commit_write(&name, &document, WriteMode::Create))
            .await?;
        Ok(id)
    }
}
