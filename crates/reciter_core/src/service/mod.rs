//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads, normalization and write-back into use-case APIs.
//! - Keep UI layers decoupled from stored JSON shapes.

pub mod error_service;
pub mod word_service;
