//! Substring keyword matching for words and error records.
//!
//! # Invariants
//! - An empty or absent keyword matches everything.
//! - Word `name` matching ignores case; word `meaning` matching does not.
//! - Error-record `content` and `note` matching both ignore case.

use crate::model::error_record::ErrorRecord;
use crate::model::word::Word;

/// Prepared keyword; `None` means "match all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    raw: String,
    lowered: String,
}

impl Keyword {
    /// Returns `None` for absent or empty input.
    pub fn parse(input: Option<&str>) -> Option<Self> {
        let raw = input.filter(|value| !value.is_empty())?;
        Some(Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Case-insensitive on `name`, case-sensitive on `meaning`.
pub fn word_matches(word: &Word, keyword: &Keyword) -> bool {
    word.name.to_lowercase().contains(&keyword.lowered) || word.meaning.contains(&keyword.raw)
}

/// Case-insensitive on `content` or `note`.
pub fn error_matches(record: &ErrorRecord, keyword: &Keyword) -> bool {
    record.content.to_lowercase().contains(&keyword.lowered)
        || record.note.to_lowercase().contains(&keyword.lowered)
}

/// Filters `items` with `matches`, returning all of them when no keyword.
pub fn filter_by_keyword<T>(
    items: Vec<T>,
    keyword: Option<&str>,
    matches: fn(&T, &Keyword) -> bool,
) -> Vec<T> {
    match Keyword::parse(keyword) {
        Some(keyword) => items
            .into_iter()
            .filter(|item| matches(item, &keyword))
            .collect(),
        None => items,
    }
}
