//! # Feature: Reminders
//!
//! Pseudo-random daily practice prompts inside each user's local window.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Draw cap so a fully elapsed window plans a short day
//! - 1.0.0: Initial day planner and dispatch

pub mod scheduler;

pub use scheduler::ReminderScheduler;
