//! Domain model for persisted vocabulary data.
//!
//! # Responsibility
//! - Define word and error-record shapes used by services.
//! - Keep raw stored JSON reachable where write-back must preserve it.
//!
//! # Invariants
//! - Word identity is an integer `WordId`.
//! - Error-record identity is an opaque string `ErrorId`.

pub mod error_record;
pub mod word;
