//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use crate::core::error::Result;
use crate::database::Database;
use crate::features::answers::AnswerLog;
use crate::features::reminders::ReminderScheduler;
use crate::features::users::UserStore;
use crate::features::vocab::VocabStore;
use crate::transport::Transport;

/// Shared services for all command handlers
///
/// Carries the stores, the reminder scheduler, and the outbound transport.
/// Cloning is cheap; every field is a thin handle.
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    pub users: UserStore,
    pub vocab: VocabStore,
    pub answers: AnswerLog,
    pub scheduler: ReminderScheduler,
    pub transport: Arc<dyn Transport>,
}

impl CommandContext {
    pub fn new(
        database: Database,
        scheduler: ReminderScheduler,
        transport: Arc<dyn Transport>,
    ) -> Self {
        CommandContext {
            users: UserStore::new(database.clone()),
            vocab: VocabStore::new(database.clone()),
            answers: AnswerLog::new(database.clone()),
            database,
            scheduler,
            transport,
        }
    }

    /// Record a free-text reply against the current pick.
    ///
    /// Returns `false` when the chat has no active items; the reply is then
    /// ignored without an error. The recorded item is whatever `pick` returns
    /// now, not necessarily the one that was prompted.
    pub async fn record_reply(&self, chat_id: i64, text: &str) -> Result<bool> {
        let Some(item) = self.vocab.pick(chat_id).await? else {
            return Ok(false);
        };
        self.answers.record(chat_id, item.id, text).await?;
        Ok(true)
    }
}
