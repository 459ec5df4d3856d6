//! # Feature: User Profiles
//!
//! Lazy per-chat profile rows carrying the reminder window settings.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;

pub use store::{UserProfile, UserStore};
