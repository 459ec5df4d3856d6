//! # Feature: Vocabulary Store
//!
//! Per-chat vocabulary items and the selection policy that decides what to
//! practice next.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Per-dialect NULL ordering in the selection query
//! - 1.0.0: Initial add/list/remove/pick operations

pub mod store;

pub use store::{VocabItem, VocabStore, LIST_LIMIT};
