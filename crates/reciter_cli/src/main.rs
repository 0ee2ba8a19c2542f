//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `reciter_core` linkage without a host application.
//! - Print word and error-record counts for an optional store file.

use reciter_core::{
    open_store, open_store_in_memory, CoreConfig, ErrorRecordService, InProcessBus, SqliteStore,
    WordLookupCache, WordService,
};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    println!("reciter_core ping={}", reciter_core::ping());
    println!("reciter_core version={}", reciter_core::core_version());

    let opened = match std::env::args().nth(1) {
        Some(path) => open_store(path),
        None => open_store_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };
    let store = match SqliteStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = CoreConfig::default();
    let words = WordService::new(
        &store,
        &config,
        Arc::new(InProcessBus::new()),
        Arc::new(WordLookupCache::new()),
    );
    let errors = ErrorRecordService::new(&store, &config);

    println!("words={}", words.list_words_sync().len());
    println!("errors={}", errors.list_errors_sync().len());
    ExitCode::SUCCESS
}
