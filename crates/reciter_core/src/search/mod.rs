//! Keyword search entry points.
//!
//! # Responsibility
//! - Decide which words and error records match a user keyword.
//! - Keep matching rules inside core so every caller filters alike.

pub mod keyword;
