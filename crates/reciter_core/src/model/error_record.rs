//! Error-record domain model.
//!
//! # Responsibility
//! - Define the canonical error-record view returned to callers.
//! - Wrap raw stored items so legacy field names survive write-back.
//!
//! # Invariants
//! - `ErrorRecord::uses_legacy_naming` is true iff the stored item has
//!   `title` and no `content`.
//! - `StoredErrorItem` never renames fields it did not write.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identity of an error record.
pub type ErrorId = String;

pub(crate) const FIELD_ID: &str = "id";
pub(crate) const FIELD_CONTENT: &str = "content";
pub(crate) const FIELD_TITLE: &str = "title";
pub(crate) const FIELD_TRANSLATION: &str = "translation";
pub(crate) const FIELD_DESC: &str = "desc";
pub(crate) const FIELD_WORD: &str = "word";
pub(crate) const FIELD_NOTE: &str = "note";
pub(crate) const FIELD_CREATE_TIME: &str = "createTime";
pub(crate) const FIELD_DATE: &str = "date";
pub(crate) const FIELD_UPDATE_TIME: &str = "updateTime";

/// Canonical error-record view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub id: ErrorId,
    pub content: String,
    pub translation: String,
    pub word: String,
    pub note: String,
    /// ISO-8601 creation time.
    pub create_time: String,
    pub update_time: Option<String>,
    /// Whether the stored item uses `title`/`desc`/`date` naming.
    #[serde(skip)]
    pub uses_legacy_naming: bool,
}

/// Input for creating an error record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewErrorInput {
    pub content: String,
    pub note: String,
}

/// Input for updating an error record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorUpdate {
    pub id: ErrorId,
    pub content: String,
    /// Empty keeps the stored note.
    pub note: String,
}

/// Raw stored error item, kept as the JSON object found on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredErrorItem(pub Map<String, Value>);

impl StoredErrorItem {
    /// Builds a canonical-shaped item for a freshly created record.
    pub fn from_record(record: &ErrorRecord) -> Self {
        let mut fields = Map::new();
        fields.insert(FIELD_ID.to_string(), Value::String(record.id.clone()));
        fields.insert(
            FIELD_CONTENT.to_string(),
            Value::String(record.content.clone()),
        );
        fields.insert(
            FIELD_TRANSLATION.to_string(),
            Value::String(record.translation.clone()),
        );
        fields.insert(FIELD_WORD.to_string(), Value::String(record.word.clone()));
        fields.insert(FIELD_NOTE.to_string(), Value::String(record.note.clone()));
        fields.insert(
            FIELD_CREATE_TIME.to_string(),
            Value::String(record.create_time.clone()),
        );
        if let Some(update_time) = &record.update_time {
            fields.insert(
                FIELD_UPDATE_TIME.to_string(),
                Value::String(update_time.clone()),
            );
        }
        Self(fields)
    }

    /// Stored id rendered as text; numbers are stringified.
    pub fn id(&self) -> String {
        match self.0.get(FIELD_ID) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        }
    }

    /// Exact id match; a numeric stored id never equals a text id.
    pub fn has_id(&self, id: &str) -> bool {
        matches!(self.0.get(FIELD_ID), Some(Value::String(stored)) if stored == id)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Legacy items carry `title` instead of `content`.
    pub fn uses_legacy_naming(&self) -> bool {
        !self.has_field(FIELD_CONTENT) && self.has_field(FIELD_TITLE)
    }

    /// Returns a non-empty string field, treating null and `""` as missing.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Value::String(value)) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), Value::String(value.into()));
    }
}
