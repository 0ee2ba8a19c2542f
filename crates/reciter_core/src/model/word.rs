//! Word entry domain model.
//!
//! # Responsibility
//! - Define the persisted word record and the caller-facing draft shape.
//! - Preserve free-form fields the core does not interpret.
//!
//! # Invariants
//! - `id` is unique within one stored word list.
//! - Unknown JSON fields round-trip untouched through `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::num::ParseIntError;

/// Integer identity of a word entry.
pub type WordId = i64;

/// Persisted word entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meaning: String,
    /// `None` when the stored record never had the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    /// Free-form fields owned by UI collaborators.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Word content supplied by callers on add/update.
///
/// Carries no identity: the service always decides the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WordDraft {
    pub fn new(name: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meaning: meaning.into(),
            ..Self::default()
        }
    }

    /// Binds this draft to a service-allocated id.
    ///
    /// Any `id` smuggled in through free-form fields is dropped.
    pub fn into_word(self, id: WordId) -> Word {
        let mut extra = self.extra;
        extra.remove("id");
        Word {
            id,
            name: self.name,
            meaning: self.meaning,
            examples: self.examples,
            related_words: self.related_words,
            notes: self.notes,
            extra,
        }
    }
}

/// Caller-provided word id before integer coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordIdInput {
    Int(WordId),
    Text(String),
}

impl WordIdInput {
    /// Coerces the input into an integer id.
    pub fn coerce(&self) -> Result<WordId, ParseIntError> {
        match self {
            Self::Int(id) => Ok(*id),
            Self::Text(text) => text.trim().parse::<WordId>(),
        }
    }
}

impl From<WordId> for WordIdInput {
    fn from(value: WordId) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for WordIdInput {
    fn from(value: i32) -> Self {
        Self::Int(WordId::from(value))
    }
}

impl From<&str> for WordIdInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for WordIdInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for WordIdInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Word, WordDraft, WordIdInput};
    use serde_json::json;

    #[test]
    fn word_keeps_unknown_fields() {
        let raw = json!({"id": 3, "name": "apple", "meaning": "fruit", "phonetic": "/ap/"});
        let word: Word = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(word.extra.get("phonetic"), Some(&json!("/ap/")));
        assert_eq!(serde_json::to_value(&word).unwrap(), raw);
    }

    #[test]
    fn draft_drops_caller_supplied_id() {
        let draft: WordDraft = serde_json::from_value(json!({"id": 99, "name": "x"})).unwrap();
        let word = draft.into_word(4);
        assert_eq!(word.id, 4);
        assert!(!word.extra.contains_key("id"));
    }

    #[test]
    fn id_input_coerces_text() {
        assert_eq!(WordIdInput::from(" 12 ").coerce().unwrap(), 12);
        assert!(WordIdInput::from("abc").coerce().is_err());
        assert_eq!(WordIdInput::from(7).coerce().unwrap(), 7);
    }
}
