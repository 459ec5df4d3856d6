//! # Core Module
//!
//! Core domain types, configuration, and error handling for the vocab coach.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::{Config, DEFAULT_TZ};
pub use error::{CoachError, Result};
pub use response::{chunk_for_message, chunk_text, MESSAGE_LIMIT};
