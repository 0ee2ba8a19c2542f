//! Format normalizer for stored word and error-record blobs.
//!
//! # Responsibility
//! - Detect which on-disk shape a stored word blob uses.
//! - Reconcile legacy and canonical error-record items per item.
//!
//! # Invariants
//! - Word detection order: absent, `forceEmpty`, bare array, wrapped object.
//! - Word items are coerced field by field; only items without an object
//!   shape or a usable integer id are unusable.
//! - Strict decoding fails on any unusable item so callers never rewrite a
//!   list that lost entries.
//! - Lenient readers (`read_*`) never fail; they skip or degrade to empty.
//! - A single error list may mix legacy and canonical items.

use crate::model::error_record::{
    ErrorRecord, StoredErrorItem, FIELD_CONTENT, FIELD_CREATE_TIME, FIELD_DATE, FIELD_DESC,
    FIELD_NOTE, FIELD_TITLE, FIELD_TRANSLATION, FIELD_UPDATE_TIME, FIELD_WORD,
};
use crate::model::word::{Word, WordId};
use crate::time::now_iso8601;
use log::warn;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FORCE_EMPTY_FIELD: &str = "forceEmpty";
const WORDS_FIELD: &str = "words";
const ID_FIELD: &str = "id";
const NAME_FIELD: &str = "name";
const MEANING_FIELD: &str = "meaning";
const EXAMPLES_FIELD: &str = "examples";
const RELATED_WORDS_FIELD: &str = "relatedWords";
const NOTES_FIELD: &str = "notes";

/// Stored blob could not be interpreted.
#[derive(Debug)]
pub enum NormalizeError {
    /// Text is not valid JSON, or items do not match the record shape.
    Malformed(serde_json::Error),
    /// Valid JSON with an unexpected top-level shape.
    UnrecognizedShape(&'static str),
    /// One stored word item cannot be represented as a word.
    UnusableItem { index: usize, reason: &'static str },
}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed stored json: {err}"),
            Self::UnrecognizedShape(details) => write!(f, "unrecognized stored shape: {details}"),
            Self::UnusableItem { index, reason } => {
                write!(f, "stored word item {index} is unusable: {reason}")
            }
        }
    }
}

impl Error for NormalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::UnrecognizedShape(_) | Self::UnusableItem { .. } => None,
        }
    }
}

impl From<serde_json::Error> for NormalizeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Detected on-disk shape of the word list.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredWordBlob {
    /// Key missing or holding an empty string.
    Absent,
    /// Object with `forceEmpty: true`; content is ignored.
    ForceEmpty,
    /// Bare JSON array of words.
    Bare(Vec<Word>),
    /// Object with a `words` array; `envelope` keeps every other key.
    Wrapped {
        words: Vec<Word>,
        envelope: Map<String, Value>,
    },
}

impl StoredWordBlob {
    /// Short shape label for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::ForceEmpty => "force_empty",
            Self::Bare(_) => "bare",
            Self::Wrapped { .. } => "wrapped",
        }
    }

    /// Words visible to read paths.
    pub fn into_visible_words(self) -> Vec<Word> {
        match self {
            Self::Absent | Self::ForceEmpty => Vec::new(),
            Self::Bare(words) | Self::Wrapped { words, .. } => words,
        }
    }

    /// Mutable access to stored words; `None` for `Absent`/`ForceEmpty`.
    pub fn words_mut(&mut self) -> Option<&mut Vec<Word>> {
        match self {
            Self::Bare(words) | Self::Wrapped { words, .. } => Some(words),
            Self::Absent | Self::ForceEmpty => None,
        }
    }

    /// Serializes this blob's own words in its shape.
    pub fn encode(&self) -> serde_json::Result<String> {
        match self {
            Self::Bare(words) | Self::Wrapped { words, .. } => self.encode_with(words),
            Self::Absent | Self::ForceEmpty => self.encode_with(&[]),
        }
    }

    /// Serializes `words` back in this blob's shape.
    ///
    /// `Absent` and `ForceEmpty` are written as a bare array.
    pub fn encode_with(&self, words: &[Word]) -> serde_json::Result<String> {
        match self {
            Self::Wrapped { envelope, .. } => {
                let mut object = envelope.clone();
                object.insert(WORDS_FIELD.to_string(), serde_json::to_value(words)?);
                serde_json::to_string(&Value::Object(object))
            }
            Self::Absent | Self::ForceEmpty | Self::Bare(_) => serde_json::to_string(words),
        }
    }
}

/// Decodes a raw word blob and reports its shape.
///
/// # Errors
/// - `Malformed` for invalid JSON.
/// - `UnusableItem` for an item that is not an object or has no usable id.
/// - `UnrecognizedShape` for any other top-level value.
pub fn decode_word_blob(raw: Option<&str>) -> Result<StoredWordBlob, NormalizeError> {
    decode_word_blob_with(raw, false)
}

fn decode_word_blob_with(
    raw: Option<&str>,
    skip_unusable: bool,
) -> Result<StoredWordBlob, NormalizeError> {
    let Some(text) = raw.filter(|text| !text.is_empty()) else {
        return Ok(StoredWordBlob::Absent);
    };

    match serde_json::from_str::<Value>(text)? {
        Value::Object(object)
            if object.get(FORCE_EMPTY_FIELD) == Some(&Value::Bool(true)) =>
        {
            Ok(StoredWordBlob::ForceEmpty)
        }
        Value::Array(items) => Ok(StoredWordBlob::Bare(decode_word_items(items, skip_unusable)?)),
        Value::Object(mut object) if object.get(WORDS_FIELD).is_some_and(Value::is_array) => {
            let items = match object.remove(WORDS_FIELD) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let words = decode_word_items(items, skip_unusable)?;
            Ok(StoredWordBlob::Wrapped {
                words,
                envelope: object,
            })
        }
        Value::Object(_) => Err(NormalizeError::UnrecognizedShape(
            "object without a words array",
        )),
        _ => Err(NormalizeError::UnrecognizedShape("not an array or object")),
    }
}

fn decode_word_items(items: Vec<Value>, skip_unusable: bool) -> Result<Vec<Word>, NormalizeError> {
    let mut words = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match word_from_item(item) {
            Ok(word) => words.push(word),
            Err(reason) if skip_unusable => {
                warn!("event=word_item_decode module=normalize status=skip index={index} reason={reason}");
            }
            Err(reason) => return Err(NormalizeError::UnusableItem { index, reason }),
        }
    }
    Ok(words)
}

/// Builds a word from one stored item, coercing loosely typed fields.
///
/// `null` or missing text becomes `""`, scalar text is stringified, and
/// list fields that are not all strings stay untouched in `extra`.
fn word_from_item(item: Value) -> Result<Word, &'static str> {
    let Value::Object(mut fields) = item else {
        return Err("not_object");
    };
    let id = fields
        .remove(ID_FIELD)
        .as_ref()
        .and_then(coerce_word_id)
        .ok_or("missing_id")?;

    Ok(Word {
        id,
        name: take_text(&mut fields, NAME_FIELD),
        meaning: take_text(&mut fields, MEANING_FIELD),
        examples: take_text_list(&mut fields, EXAMPLES_FIELD),
        related_words: take_text_list(&mut fields, RELATED_WORDS_FIELD),
        notes: take_text_list(&mut fields, NOTES_FIELD),
        extra: fields,
    })
}

fn coerce_word_id(value: &Value) -> Option<WordId> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|id| id.fract() == 0.0 && id.abs() < 9.0e15)
                .map(|id| id as WordId)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn take_text(fields: &mut Map<String, Value>, name: &str) -> String {
    match fields.remove(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

fn take_text_list(fields: &mut Map<String, Value>, name: &str) -> Option<Vec<String>> {
    let value = fields.remove(name)?;
    let all_strings = value
        .as_array()
        .is_some_and(|entries| entries.iter().all(Value::is_string));
    if !all_strings {
        fields.insert(name.to_string(), value);
        return None;
    }

    match value {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Lenient word-list view used by read paths.
///
/// Unusable items are skipped; an unreadable blob reads as empty.
pub fn read_word_list(raw: Option<&str>) -> Vec<Word> {
    match decode_word_blob_with(raw, true) {
        Ok(blob) => blob.into_visible_words(),
        Err(err) => {
            warn!("event=word_blob_decode module=normalize status=error error={err}");
            Vec::new()
        }
    }
}

/// Decodes the raw error list into stored items without normalizing them.
pub fn decode_error_items(raw: Option<&str>) -> Result<Vec<StoredErrorItem>, NormalizeError> {
    let Some(text) = raw.filter(|text| !text.is_empty()) else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(serde_json::from_value(Value::Array(items))?),
        _ => Err(NormalizeError::UnrecognizedShape("error list is not an array")),
    }
}

/// Produces the canonical view of one stored item.
///
/// Missing text falls back to its legacy twin, then to `""`; a missing
/// creation time falls back to `date`, then to the current time.
pub fn normalize_error_item(item: &StoredErrorItem) -> ErrorRecord {
    let text_or = |primary: &str, legacy: Option<&str>| -> String {
        item.text(primary)
            .or_else(|| legacy.and_then(|name| item.text(name)))
            .unwrap_or_default()
            .to_string()
    };

    let create_time = item
        .text(FIELD_CREATE_TIME)
        .or_else(|| item.text(FIELD_DATE))
        .map(str::to_string)
        .unwrap_or_else(now_iso8601);

    ErrorRecord {
        id: item.id(),
        content: text_or(FIELD_CONTENT, Some(FIELD_TITLE)),
        translation: text_or(FIELD_TRANSLATION, Some(FIELD_DESC)),
        word: text_or(FIELD_WORD, None),
        note: text_or(FIELD_NOTE, None),
        create_time,
        update_time: item.text(FIELD_UPDATE_TIME).map(str::to_string),
        uses_legacy_naming: item.uses_legacy_naming(),
    }
}

/// Lenient canonical error-list view used by read paths.
pub fn read_error_list(raw: Option<&str>) -> Vec<ErrorRecord> {
    match decode_error_items(raw) {
        Ok(items) => items.iter().map(normalize_error_item).collect(),
        Err(err) => {
            warn!("event=error_blob_decode module=normalize status=error error={err}");
            Vec::new()
        }
    }
}
