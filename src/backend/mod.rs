// ABOUTME: Backend seams the seeder writes through: identities, documents, realtime store
// ABOUTME: Firebase REST clients implement them in production, MemoryBackend in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Backend abstraction
//!
//! The seeder never talks to Firebase directly. It holds a [`Backend`], three
//! trait objects that each cover one managed service:
//!
//! - [`IdentityProvider`]: create-or-lookup of login identities
//! - [`DocumentStore`]: merge/replace writes and auto-id inserts
//! - [`RealtimeStore`]: a separately-authorized append API
//!
//! A [`BackendConnector`] builds the `Backend` from a credential file. It is
//! only invoked once the credential file is known to exist, so a missing key
//! file never reaches any backend.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use caretrack_core::errors::AppResult;
use serde_json::Value;

use crate::firebase::token::AccessToken;

/// Document payloads
pub mod document;
/// In-memory backend for tests and dry runs
pub mod memory;

pub use document::Document;
pub use memory::MemoryBackend;

/// Login identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity and return its backend-assigned id
    ///
    /// # Errors
    ///
    /// Returns an error with `ErrorCode::ResourceAlreadyExists` when an
    /// identity with this email exists, and other codes for any other failure.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AppResult<String>;

    /// Id of the identity registered under `email`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no identity has this email.
    async fn lookup_identity_by_email(&self, email: &str) -> AppResult<String>;
}

/// Hierarchical document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a document at `collection/document_id`
    ///
    /// With `merge`, only the document's fields are written and every other
    /// existing field is kept; without it the document is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        document: Document,
        merge: bool,
    ) -> AppResult<()>;

    /// Insert a document under a generated id and return the id
    ///
    /// `collection` may be a sub-collection path (`clients/{id}/diagnosisHistory`).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    async fn add_document(&self, collection: &str, document: Document) -> AppResult<String>;
}

/// Realtime key-value store reached through its own credential exchange
#[async_trait]
pub trait RealtimeStore: Send + Sync {
    /// Exchange the service credential for a realtime-scoped token
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails.
    async fn access_token(&self) -> AppResult<AccessToken>;

    /// Append `body` as a new child of `path`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    async fn push(&self, token: &AccessToken, path: &str, body: &Value) -> AppResult<()>;
}

/// The three services a seeding run writes to
#[derive(Clone)]
pub struct Backend {
    /// Identity service
    pub identity: Arc<dyn IdentityProvider>,
    /// Document store
    pub documents: Arc<dyn DocumentStore>,
    /// Realtime store
    pub realtime: Arc<dyn RealtimeStore>,
}

/// Builds a [`Backend`] from a verified credential file
#[async_trait]
pub trait BackendConnector: Send + Sync {
    /// Connect using the credential at `credential_path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the credential cannot be used.
    async fn connect(&self, credential_path: &Path) -> AppResult<Backend>;
}
