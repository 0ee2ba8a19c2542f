//! Identifier allocation for words and error records.
//!
//! # Invariants
//! - Word ids follow `max(existing) + 1`, starting at `1`.
//! - Error ids are probabilistically unique; collisions are not checked.

use crate::model::error_record::ErrorId;
use crate::model::word::{Word, WordId};
use crate::time::now_epoch_ms;
use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ERROR_ID_SUFFIX_LEN: u32 = 5;

/// Returns the id for the next word appended to `words`.
pub fn next_word_id(words: &[Word]) -> WordId {
    words.iter().map(|word| word.id).max().map_or(1, |max| max + 1)
}

/// Generates an error-record id: base36 epoch millis plus a random suffix.
pub fn generate_error_id() -> ErrorId {
    let millis = u128::try_from(now_epoch_ms()).unwrap_or_default();
    let suffix_space = 36u128.pow(ERROR_ID_SUFFIX_LEN);
    let suffix = Uuid::new_v4().as_u128() % suffix_space;

    let mut id = to_base36(millis);
    id.push_str(&format!(
        "{:0>width$}",
        to_base36(suffix),
        width = ERROR_ID_SUFFIX_LEN as usize
    ));
    id
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
