//! Profile store: lazy creation and validated settings updates

use log::debug;

use crate::core::config::DEFAULT_TZ;
use crate::core::error::{CoachError, Result};
use crate::database::{Database, SqlRow};

/// Reminder window settings for one chat.
///
/// Rows are created lazily on first interaction and never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub chat_id: i64,
    /// IANA zone name.
    pub tz: String,
    /// First hour reminders may be sampled from (0-23).
    pub start_hour: i64,
    /// Exclusive upper bound of the sampling window (0-23).
    pub end_hour: i64,
    /// Target reminders per day; clamped to 1..=12 wherever it is consumed.
    pub daily_count: i64,
}

#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        UserStore { db }
    }

    /// Fetch the profile for a chat, inserting a defaults row on first
    /// contact.
    pub async fn get_or_create(&self, chat_id: i64) -> Result<UserProfile> {
        if let Some(profile) = self.fetch(chat_id).await? {
            return Ok(profile);
        }

        debug!("Creating profile for chat {chat_id}");
        self.db
            .execute("INSERT INTO users(id) VALUES(?)", &[chat_id.into()])
            .await?;

        match self.fetch(chat_id).await? {
            Some(profile) => Ok(profile),
            None => Err(CoachError::Storage(sqlx::Error::RowNotFound)),
        }
    }

    /// Validate and persist new reminder settings.
    ///
    /// Hours must lie in 0..=23 and the timezone must be a known IANA name;
    /// the daily count is clamped to the supported 1..=12 range. Validation
    /// failure leaves the stored profile untouched.
    pub async fn update_settings(
        &self,
        chat_id: i64,
        daily_count: i64,
        start_hour: i64,
        end_hour: i64,
        tz: &str,
    ) -> Result<()> {
        if !(0..=23).contains(&start_hour) || !(0..=23).contains(&end_hour) {
            return Err(CoachError::Validation(
                "hours must be between 0 and 23".to_string(),
            ));
        }
        if tz.parse::<chrono_tz::Tz>().is_err() {
            return Err(CoachError::Validation(format!("unknown timezone: {tz}")));
        }
        let daily_count = daily_count.clamp(1, 12);

        self.db
            .execute(
                "UPDATE users SET daily_count = ?, start_hour = ?, end_hour = ?, tz = ? WHERE id = ?",
                &[
                    daily_count.into(),
                    start_hour.into(),
                    end_hour.into(),
                    tz.into(),
                    chat_id.into(),
                ],
            )
            .await
    }

    async fn fetch(&self, chat_id: i64) -> Result<Option<UserProfile>> {
        let row = self
            .db
            .fetch_one(
                "SELECT id, tz, start_hour, end_hour, daily_count FROM users WHERE id = ?",
                &[chat_id.into()],
            )
            .await?;
        row.as_ref().map(Self::profile_from).transpose()
    }

    fn profile_from(row: &SqlRow) -> Result<UserProfile> {
        Ok(UserProfile {
            chat_id: row.integer(0)?,
            tz: row.opt_text(1)?.unwrap_or(DEFAULT_TZ).to_string(),
            start_hour: row.integer(2)?,
            end_hour: row.integer(3)?,
            daily_count: row.integer(4)?,
        })
    }
}
