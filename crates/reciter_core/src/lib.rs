//! Core data-access layer for the Reciter vocabulary app.
//! This crate owns stored word/error-record shapes and their invariants.

pub mod cache;
pub mod config;
pub mod ids;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod notify;
pub mod search;
pub mod service;
pub mod store;
pub mod time;

pub use cache::{CacheInvalidator, WordLookupCache};
pub use config::{CoreConfig, StorageKeys};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::error_record::{ErrorId, ErrorRecord, ErrorUpdate, NewErrorInput, StoredErrorItem};
pub use model::word::{Word, WordDraft, WordId, WordIdInput};
pub use normalize::{NormalizeError, StoredWordBlob};
pub use notify::{DataEvent, InProcessBus, NotificationBus, NotifyError};
pub use service::error_service::ErrorRecordService;
pub use service::word_service::{WordService, WordServiceError};
pub use store::{
    open_store, open_store_in_memory, KeyValueStore, MemoryStore, SqliteStore, StoreError,
    StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
