//! Read-through word caches owned by UI collaborators.
//!
//! The core never populates these caches; it only clears them after every
//! word update or delete.

use crate::model::word::{Word, WordId};
use std::collections::HashMap;
use std::sync::Mutex;

/// Capability to drop every cached word lookup.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate_all(&self);
}

/// By-id cache plus preload cache used by word detail views.
#[derive(Debug, Default)]
pub struct WordLookupCache {
    by_id: Mutex<HashMap<WordId, Word>>,
    preload: Mutex<HashMap<String, Vec<Word>>>,
}

impl WordLookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, word: Word) {
        if let Ok(mut by_id) = self.by_id.lock() {
            by_id.insert(word.id, word);
        }
    }

    pub fn get(&self, id: WordId) -> Option<Word> {
        self.by_id.lock().ok()?.get(&id).cloned()
    }

    /// Stores a preloaded page of words under a view-defined key.
    pub fn put_preload(&self, key: impl Into<String>, words: Vec<Word>) {
        if let Ok(mut preload) = self.preload.lock() {
            preload.insert(key.into(), words);
        }
    }

    pub fn get_preload(&self, key: &str) -> Option<Vec<Word>> {
        self.preload.lock().ok()?.get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        let by_id_empty = self.by_id.lock().map_or(true, |by_id| by_id.is_empty());
        let preload_empty = self
            .preload
            .lock()
            .map_or(true, |preload| preload.is_empty());
        by_id_empty && preload_empty
    }
}

impl CacheInvalidator for WordLookupCache {
    fn invalidate_all(&self) {
        if let Ok(mut by_id) = self.by_id.lock() {
            by_id.clear();
        }
        if let Ok(mut preload) = self.preload.lock() {
            preload.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheInvalidator, WordLookupCache};
    use crate::model::word::WordDraft;

    #[test]
    fn invalidate_all_clears_both_caches() {
        let cache = WordLookupCache::new();
        let word = WordDraft::new("apple", "fruit").into_word(1);
        cache.put(word.clone());
        cache.put_preload("home", vec![word]);
        assert!(cache.get(1).is_some());
        assert!(!cache.is_empty());

        cache.invalidate_all();
        assert!(cache.get(1).is_none());
        assert!(cache.get_preload("home").is_none());
        assert!(cache.is_empty());
    }
}
