//! Answer recording and export

use chrono::{SecondsFormat, Utc};

use crate::core::error::Result;
use crate::database::Database;

/// One exported answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRow {
    /// RFC 3339 UTC instant the reply was recorded at.
    pub answered_at: String,
    pub text: String,
}

#[derive(Clone)]
pub struct AnswerLog {
    db: Database,
}

impl AnswerLog {
    pub fn new(db: Database) -> Self {
        AnswerLog { db }
    }

    /// Append the reply, then advance the item's practice state.
    ///
    /// Two independent single-row statements, not a transaction: the answer
    /// row is the durable record, the strength counter a derived value.
    pub async fn record(&self, owner_id: i64, vocab_id: i64, text: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        self.db
            .execute(
                "INSERT INTO answers(owner_id, vocab_id, text, answered_at) VALUES(?, ?, ?, ?)",
                &[
                    owner_id.into(),
                    vocab_id.into(),
                    text.into(),
                    now.as_str().into(),
                ],
            )
            .await?;

        self.db
            .execute(
                "UPDATE vocab SET last_seen = ?, strength = strength + 1 WHERE id = ?",
                &[now.as_str().into(), vocab_id.into()],
            )
            .await
    }

    /// All answers for a chat, newest first.
    pub async fn export(&self, owner_id: i64) -> Result<Vec<AnswerRow>> {
        let rows = self
            .db
            .fetch_all(
                "SELECT answered_at, text FROM answers WHERE owner_id = ? ORDER BY answered_at DESC",
                &[owner_id.into()],
            )
            .await?;
        rows.iter()
            .map(|row| {
                Ok(AnswerRow {
                    answered_at: row.text(0)?.to_string(),
                    text: row.text(1)?.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::vocab::{VocabStore, LIST_LIMIT};

    async fn stores() -> (AnswerLog, VocabStore) {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        (AnswerLog::new(db.clone()), VocabStore::new(db))
    }

    #[tokio::test]
    async fn test_record_bumps_strength_and_last_seen() {
        let (answers, vocab) = stores().await;
        vocab.add(1, "el puente").await.unwrap();
        let id = vocab.list(1, LIST_LIMIT).await.unwrap()[0].id;

        answers.record(1, id, "first try").await.unwrap();
        let item = vocab.list(1, LIST_LIMIT).await.unwrap().remove(0);
        assert_eq!(item.strength, 1);
        let first_seen = item.last_seen.expect("set after recording");

        answers.record(1, id, "second try").await.unwrap();
        let item = vocab.list(1, LIST_LIMIT).await.unwrap().remove(0);
        assert_eq!(item.strength, 2);
        let second_seen = item.last_seen.expect("still set");
        assert!(second_seen >= first_seen, "last_seen never moves backwards");
    }

    #[tokio::test]
    async fn test_export_is_reverse_chronological() {
        let (answers, vocab) = stores().await;
        vocab.add(1, "palabra").await.unwrap();
        let id = vocab.list(1, LIST_LIMIT).await.unwrap()[0].id;

        for text in ["one", "two", "three"] {
            answers.record(1, id, text).await.unwrap();
        }

        let exported = answers.export(1).await.unwrap();
        assert_eq!(exported.len(), 3);
        let texts: Vec<&str> = exported.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["three", "two", "one"]);
        assert!(exported.windows(2).all(|w| w[0].answered_at >= w[1].answered_at));
    }

    #[tokio::test]
    async fn test_export_scoped_to_owner() {
        let (answers, vocab) = stores().await;
        vocab.add(1, "mine").await.unwrap();
        vocab.add(2, "theirs").await.unwrap();
        let mine = vocab.list(1, LIST_LIMIT).await.unwrap()[0].id;
        let theirs = vocab.list(2, LIST_LIMIT).await.unwrap()[0].id;

        answers.record(1, mine, "a").await.unwrap();
        answers.record(2, theirs, "b").await.unwrap();

        let exported = answers.export(1).await.unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].text, "a");
    }

    #[tokio::test]
    async fn test_empty_export() {
        let (answers, _) = stores().await;
        assert!(answers.export(5).await.unwrap().is_empty());
    }
}
