//! # Features Layer
//!
//! The coach's functional modules: user profiles, the vocabulary store and
//! its selection policy, the answer log, reminder scheduling, and the
//! liveness endpoint.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod answers;
pub mod health;
pub mod reminders;
pub mod users;
pub mod vocab;

pub use answers::AnswerLog;
pub use reminders::ReminderScheduler;
pub use users::{UserProfile, UserStore};
pub use vocab::{VocabItem, VocabStore};
