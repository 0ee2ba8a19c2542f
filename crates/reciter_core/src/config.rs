//! Core service configuration.
//!
//! # Invariants
//! - Defaults match the storage keys already present on user devices.

use crate::notify::DEFAULT_NOTIFY_WINDOW;
use std::time::Duration;

pub const DEFAULT_WORD_LIST_KEY: &str = "reciter_words";
pub const DEFAULT_ERROR_LIST_KEY: &str = "reciter_errorbook";

/// Store keys holding the two persisted blobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub word_list: String,
    pub error_list: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            word_list: DEFAULT_WORD_LIST_KEY.to_string(),
            error_list: DEFAULT_ERROR_LIST_KEY.to_string(),
        }
    }
}

/// Configuration shared by word and error-record services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub keys: StorageKeys,
    /// Minimum spacing between emitted word count notifications.
    pub notify_window: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            notify_window: DEFAULT_NOTIFY_WINDOW,
        }
    }
}
