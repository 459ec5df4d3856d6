// Core layer - shared types, configuration, and error handling
pub mod core;

// Infrastructure layer - dual-backend persistence gateway
pub mod database;

// Features layer - stores, reminder scheduling, health endpoint
pub mod features;

// Application layer - command handlers and registry
pub mod commands;

// Transport layer - delivery seam and the Telegram client
pub mod transport;

// Re-export the items binaries and tests reach for most often
pub use crate::core::{CoachError, Config};
pub use crate::database::Database;
pub use crate::features::{AnswerLog, ReminderScheduler, UserStore, VocabStore};
pub use crate::transport::Transport;
