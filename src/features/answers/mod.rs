//! # Feature: Answer Log
//!
//! Append-only record of practice replies, plus the export query.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;

pub use store::{AnswerLog, AnswerRow};
