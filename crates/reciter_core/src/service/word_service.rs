//! Word use-case service.
//!
//! # Responsibility
//! - Provide list/get/add/update/delete/search over the stored word list.
//! - Allocate word ids and keep the on-disk blob shape stable on update.
//! - Invalidate collaborator caches and publish change notifications.
//!
//! # Invariants
//! - Only `update_word` surfaces failures; every other operation degrades
//!   to an empty list or `None`.
//! - `add_word` and `delete_word` always persist a bare array, and never
//!   write when the stored blob cannot be decoded in full.
//! - `update_word` writes back in the shape it read.
//! - Notification failures never change an operation's outcome.

use crate::cache::CacheInvalidator;
use crate::config::CoreConfig;
use crate::ids::next_word_id;
use crate::model::word::{Word, WordDraft, WordId, WordIdInput};
use crate::normalize::{decode_word_blob, read_word_list, StoredWordBlob};
use crate::notify::{CountDecision, CountNotifier, DataEvent, NotificationBus};
use crate::search::keyword::{filter_by_keyword, word_matches};
use crate::store::{KeyValueStore, StoreError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Failure surfaced by `update_word`.
#[derive(Debug)]
pub enum WordServiceError {
    /// No stored word has the requested id.
    NotFound(WordIdInput),
    /// Stored blob cannot be parsed or recognized.
    StorageCorrupt(String),
    Storage(StoreError),
    Encode(serde_json::Error),
}

impl Display for WordServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "word not found: {id}"),
            Self::StorageCorrupt(details) => write!(f, "stored word list is corrupt: {details}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode word list: {err}"),
        }
    }
}

impl Error for WordServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::StorageCorrupt(_) => None,
        }
    }
}

impl From<StoreError> for WordServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for WordServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Word service over a key-value store.
pub struct WordService<S: KeyValueStore> {
    store: S,
    key: String,
    bus: Arc<dyn NotificationBus>,
    cache: Arc<dyn CacheInvalidator>,
    count_notifier: CountNotifier,
}

impl<S: KeyValueStore> WordService<S> {
    /// Creates a service bound to `config.keys.word_list`.
    pub fn new(
        store: S,
        config: &CoreConfig,
        bus: Arc<dyn NotificationBus>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            store,
            key: config.keys.word_list.clone(),
            bus,
            cache,
            count_notifier: CountNotifier::new(config.notify_window),
        }
    }

    /// Lists all visible words, notifying the count unless `silent`.
    pub async fn list_words(&self, silent: bool) -> Vec<Word> {
        let words = self.list_words_sync();
        if !silent {
            self.notify_count(words.len());
        }
        words
    }

    /// Lists all visible words without notifying.
    pub fn list_words_sync(&self) -> Vec<Word> {
        match self.store.read(&self.key) {
            Ok(raw) => read_word_list(raw.as_deref()),
            Err(err) => {
                error!("event=word_list module=word_service status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Gets one word; string ids are coerced to integers.
    pub async fn get_word_by_id(&self, id: impl Into<WordIdInput>) -> Option<Word> {
        self.get_word_by_id_sync(id)
    }

    pub fn get_word_by_id_sync(&self, id: impl Into<WordIdInput>) -> Option<Word> {
        let input = id.into();
        let Ok(target) = input.coerce() else {
            debug!("event=word_get module=word_service status=skip reason=non_numeric_id");
            return None;
        };

        self.list_words_sync()
            .into_iter()
            .find(|word| word.id == target)
    }

    /// Appends a word with the next free id and returns the full list.
    ///
    /// Returns an empty list when the store cannot be read, decoded or
    /// written; an undecodable blob is left untouched.
    pub async fn add_word(&self, draft: WordDraft) -> Vec<Word> {
        let Some(mut words) = self.read_for_rewrite("word_add") else {
            return Vec::new();
        };

        let id = next_word_id(&words);
        words.push(draft.into_word(id));

        if let Err(err) = self.persist(&StoredWordBlob::Absent, &words) {
            error!("event=word_add module=word_service status=error error={err}");
            return Vec::new();
        }

        info!(
            "event=word_add module=word_service status=ok word_id={} count={}",
            id,
            words.len()
        );
        self.notify_count(words.len());
        words
    }

    /// Replaces one word in place, keeping its id and the blob shape.
    ///
    /// # Errors
    /// - `NotFound` when no visible word has the id.
    /// - `StorageCorrupt` when the stored blob cannot be interpreted.
    /// - `Storage`/`Encode` when persistence fails.
    pub async fn update_word(
        &self,
        id: impl Into<WordIdInput>,
        draft: WordDraft,
    ) -> Result<Word, WordServiceError> {
        let input = id.into();
        match self.update_word_inner(&input, draft) {
            Ok(word) => {
                info!(
                    "event=word_update module=word_service status=ok word_id={}",
                    word.id
                );
                self.cache.invalidate_all();
                self.request_refresh();
                self.publish(DataEvent::WordUpdated {
                    id: word.id,
                    word: word.clone(),
                });
                self.publish(DataEvent::WordsCountUpdated { count: None });
                self.publish(DataEvent::GlobalDataUpdated);
                Ok(word)
            }
            Err(err) => {
                warn!("event=word_update module=word_service status=error error={err}");
                Err(err)
            }
        }
    }

    fn update_word_inner(
        &self,
        input: &WordIdInput,
        draft: WordDraft,
    ) -> Result<Word, WordServiceError> {
        let raw = self.store.read(&self.key)?;
        let mut blob = decode_word_blob(raw.as_deref())
            .map_err(|err| WordServiceError::StorageCorrupt(err.to_string()))?;
        let target = input
            .coerce()
            .map_err(|_| WordServiceError::NotFound(input.clone()))?;

        let words = blob
            .words_mut()
            .ok_or_else(|| WordServiceError::NotFound(input.clone()))?;
        let index = words
            .iter()
            .position(|word| word.id == target)
            .ok_or_else(|| WordServiceError::NotFound(input.clone()))?;

        let mut updated = draft.into_word(words[index].id);
        updated.examples.get_or_insert_with(Vec::new);
        updated.related_words.get_or_insert_with(Vec::new);
        updated.notes.get_or_insert_with(Vec::new);
        words[index] = updated.clone();

        let encoded = blob.encode()?;
        self.store.write(&self.key, &encoded)?;
        debug!(
            "event=word_update module=word_service status=persisted shape={}",
            blob.shape()
        );
        Ok(updated)
    }

    /// Removes words whose id equals `id` and returns the remainder.
    ///
    /// An undecodable blob is left untouched and an empty list is returned.
    pub async fn delete_word(&self, id: WordId) -> Vec<Word> {
        let Some(words) = self.read_for_rewrite("word_delete") else {
            return Vec::new();
        };

        let remaining: Vec<Word> = words.into_iter().filter(|word| word.id != id).collect();
        if let Err(err) = self.persist(&StoredWordBlob::Absent, &remaining) {
            error!("event=word_delete module=word_service status=error error={err}");
            return Vec::new();
        }

        info!(
            "event=word_delete module=word_service status=ok word_id={} count={}",
            id,
            remaining.len()
        );
        self.cache.invalidate_all();
        self.notify_count(remaining.len());
        self.publish(DataEvent::GlobalDataUpdated);
        remaining
    }

    /// Searches names (any case) and meanings (exact case).
    pub async fn search_words(&self, keyword: Option<&str>) -> Vec<Word> {
        filter_by_keyword(self.list_words_sync(), keyword, word_matches)
    }

    /// Strict read before a full-list rewrite; `None` means do not write.
    fn read_for_rewrite(&self, event: &str) -> Option<Vec<Word>> {
        let raw = match self.store.read(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                error!("event={event} module=word_service status=error error={err}");
                return None;
            }
        };
        match decode_word_blob(raw.as_deref()) {
            Ok(blob) => Some(blob.into_visible_words()),
            Err(err) => {
                error!("event={event} module=word_service status=skip reason=undecodable_store error={err}");
                None
            }
        }
    }

    fn persist(&self, shape: &StoredWordBlob, words: &[Word]) -> Result<(), WordServiceError> {
        let encoded = shape.encode_with(words)?;
        self.store.write(&self.key, &encoded)?;
        Ok(())
    }

    fn notify_count(&self, count: usize) {
        match self.count_notifier.check(count) {
            CountDecision::Emit => {
                self.publish(DataEvent::WordsCountUpdated { count: Some(count) });
                self.publish(DataEvent::GlobalDataUpdated);
            }
            CountDecision::SameCount => {
                debug!("event=word_count_notify module=word_service status=skip reason=same_count count={count}");
            }
            CountDecision::TooSoon => {
                debug!("event=word_count_notify module=word_service status=skip reason=too_soon count={count}");
            }
        }
    }

    /// Asks the presenting view to reload; failures are ignored.
    fn request_refresh(&self) {
        if let Err(err) = self.bus.publish(&DataEvent::RefreshRequested) {
            debug!("event=word_refresh module=word_service status=skip error={err}");
        }
    }

    fn publish(&self, event: DataEvent) {
        if let Err(err) = self.bus.publish(&event) {
            warn!(
                "event=notify_publish module=word_service status=error name={} error={}",
                event.name(),
                err
            );
        }
    }
}
