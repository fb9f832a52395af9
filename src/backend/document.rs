// ABOUTME: Document payload passed to the document store: JSON fields plus server timestamps
// ABOUTME: Built from any serializable model so writers never hand-assemble field maps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use caretrack_core::errors::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields to write, and which extra fields the server fills with its clock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
    server_timestamps: Vec<String>,
}

impl Document {
    /// Document from an explicit field map
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            server_timestamps: Vec::new(),
        }
    }

    /// Document from a model that serializes to a JSON object
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the model does not serialize to an object.
    pub fn from_model<T: Serialize>(model: &T) -> AppResult<Self> {
        match serde_json::to_value(model)? {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            other => Err(AppError::invalid_input(format!(
                "Documents must be JSON objects, got {other}"
            ))),
        }
    }

    /// Also set `field` to the server's request time
    #[must_use]
    pub fn with_server_timestamp(mut self, field: &str) -> Self {
        self.fields.remove(field);
        if !self.server_timestamps.iter().any(|f| f == field) {
            self.server_timestamps.push(field.to_owned());
        }
        self
    }

    /// Literal fields
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Fields filled with the server timestamp
    #[must_use]
    pub fn server_timestamps(&self) -> &[String] {
        &self.server_timestamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_model_requires_object() {
        assert!(Document::from_model(&json!({"a": 1})).is_ok());
        assert!(Document::from_model(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_server_timestamp_replaces_literal_field() {
        let doc = Document::from_model(&json!({"name": "x", "createdAt": "client"}))
            .unwrap()
            .with_server_timestamp("createdAt")
            .with_server_timestamp("createdAt")
            .with_server_timestamp("updatedAt");

        assert!(!doc.fields().contains_key("createdAt"));
        assert_eq!(doc.server_timestamps(), ["createdAt", "updatedAt"]);
        assert_eq!(doc.fields().keys().collect::<Vec<_>>(), ["name"]);
    }
}
