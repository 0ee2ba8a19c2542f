//! Error-record use-case service.
//!
//! # Responsibility
//! - Provide list/get/add/update/delete/search over logged error records.
//! - Return canonical records while preserving legacy naming on disk.
//!
//! # Invariants
//! - New records are canonical-shaped and prepended (newest first).
//! - Updates rewrite only `content`/`title`, `note` and `updateTime`.
//! - No operation returns an error; failures map to `None`/`false`/empty.
//! - Id lookups compare the stored id value exactly; numeric ids never
//!   match a text id.

use crate::config::CoreConfig;
use crate::ids::generate_error_id;
use crate::model::error_record::{
    ErrorRecord, ErrorUpdate, NewErrorInput, StoredErrorItem, FIELD_CONTENT, FIELD_NOTE,
    FIELD_TITLE, FIELD_UPDATE_TIME,
};
use crate::normalize::{decode_error_items, normalize_error_item, read_error_list};
use crate::search::keyword::{error_matches, filter_by_keyword};
use crate::store::KeyValueStore;
use crate::time::now_iso8601;
use log::{error, info, warn};

/// Error-record service over a key-value store.
pub struct ErrorRecordService<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ErrorRecordService<S> {
    /// Creates a service bound to `config.keys.error_list`.
    pub fn new(store: S, config: &CoreConfig) -> Self {
        Self {
            store,
            key: config.keys.error_list.clone(),
        }
    }

    pub async fn list_errors(&self) -> Vec<ErrorRecord> {
        self.list_errors_sync()
    }

    /// Canonical view of every stored record.
    pub fn list_errors_sync(&self) -> Vec<ErrorRecord> {
        match self.store.read(&self.key) {
            Ok(raw) => read_error_list(raw.as_deref()),
            Err(err) => {
                error!("event=error_list module=error_service status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Gets one record by exact id.
    pub async fn get_error_by_id(&self, id: &str) -> Option<ErrorRecord> {
        let raw = match self.store.read(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                error!("event=error_get module=error_service status=error error={err}");
                return None;
            }
        };
        decode_error_items(raw.as_deref())
            .ok()?
            .iter()
            .find(|item| item.has_id(id))
            .map(normalize_error_item)
    }

    /// Creates and prepends a canonical record.
    ///
    /// A stored blob that is not an array is replaced by a fresh list.
    pub async fn add_error(&self, input: NewErrorInput) -> Option<ErrorRecord> {
        let raw = match self.store.read(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                error!("event=error_add module=error_service status=error error={err}");
                return None;
            }
        };
        let mut items = decode_error_items(raw.as_deref()).unwrap_or_else(|err| {
            warn!("event=error_add module=error_service status=reset error={err}");
            Vec::new()
        });

        let record = ErrorRecord {
            id: generate_error_id(),
            content: input.content,
            translation: String::new(),
            word: String::new(),
            note: input.note,
            create_time: now_iso8601(),
            update_time: None,
            uses_legacy_naming: false,
        };
        items.insert(0, StoredErrorItem::from_record(&record));

        if !self.persist(&items, "error_add") {
            return None;
        }
        info!(
            "event=error_add module=error_service status=ok count={}",
            items.len()
        );
        Some(record)
    }

    /// Updates content and note of one record.
    ///
    /// Returns `false` when the store is empty, unreadable, not an array,
    /// or has no record with `update.id`.
    pub async fn update_error(&self, update: ErrorUpdate) -> bool {
        let Some(mut items) = self.load_items("error_update") else {
            return false;
        };
        let Some(item) = items.iter_mut().find(|item| item.has_id(&update.id)) else {
            warn!("event=error_update module=error_service status=skip reason=not_found");
            return false;
        };

        let content_field = if item.has_field(FIELD_CONTENT) {
            FIELD_CONTENT
        } else if item.has_field(FIELD_TITLE) {
            FIELD_TITLE
        } else {
            FIELD_CONTENT
        };
        item.set_text(content_field, update.content);

        let note = if update.note.is_empty() {
            item.text(FIELD_NOTE).unwrap_or_default().to_string()
        } else {
            update.note
        };
        item.set_text(FIELD_NOTE, note);
        item.set_text(FIELD_UPDATE_TIME, now_iso8601());

        let legacy = item.uses_legacy_naming();
        if !self.persist(&items, "error_update") {
            return false;
        }
        info!("event=error_update module=error_service status=ok legacy_naming={legacy}");
        true
    }

    /// Removes records with `id`; `false` when nothing matched.
    pub async fn delete_error(&self, id: &str) -> bool {
        let Some(mut items) = self.load_items("error_delete") else {
            return false;
        };

        let before = items.len();
        items.retain(|item| !item.has_id(id));
        if items.len() == before {
            warn!("event=error_delete module=error_service status=skip reason=not_found");
            return false;
        }

        if !self.persist(&items, "error_delete") {
            return false;
        }
        info!(
            "event=error_delete module=error_service status=ok count={}",
            items.len()
        );
        true
    }

    /// Case-insensitive search on content or note.
    pub async fn search_errors(&self, keyword: Option<&str>) -> Vec<ErrorRecord> {
        filter_by_keyword(self.list_errors_sync(), keyword, error_matches)
    }

    /// Strict load for write paths; absent or empty data is a failure.
    fn load_items(&self, event: &str) -> Option<Vec<StoredErrorItem>> {
        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                warn!("event={event} module=error_service status=skip reason=empty_store");
                return None;
            }
            Err(err) => {
                error!("event={event} module=error_service status=error error={err}");
                return None;
            }
        };

        match decode_error_items(Some(raw.as_str())) {
            Ok(items) => Some(items),
            Err(err) => {
                warn!("event={event} module=error_service status=error error={err}");
                None
            }
        }
    }

    fn persist(&self, items: &[StoredErrorItem], event: &str) -> bool {
        let encoded = match serde_json::to_string(items) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!("event={event} module=error_service status=error error={err}");
                return false;
            }
        };
        match self.store.write(&self.key, &encoded) {
            Ok(()) => true,
            Err(err) => {
                error!("event={event} module=error_service status=error error={err}");
                false
            }
        }
    }
}
