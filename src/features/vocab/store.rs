//! Vocabulary CRUD and the practice-selection query

use crate::core::error::Result;
use crate::database::{Database, Dialect, SqlRow};

/// Default cap on `/list` output.
pub const LIST_LIMIT: i64 = 50;

/// One active vocabulary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabItem {
    pub id: i64,
    pub text: String,
    /// RFC 3339 UTC instant of the last recorded answer, if any.
    pub last_seen: Option<String>,
    /// Count of recorded answers; monotonically non-decreasing.
    pub strength: i64,
}

#[derive(Clone)]
pub struct VocabStore {
    db: Database,
}

impl VocabStore {
    pub fn new(db: Database) -> Self {
        VocabStore { db }
    }

    /// Add a phrase for a chat. Whitespace-only input is a silent no-op.
    pub async fn add(&self, owner_id: i64, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.db
            .execute(
                "INSERT INTO vocab(owner_id, text) VALUES(?, ?)",
                &[owner_id.into(), text.into()],
            )
            .await
    }

    /// Active items in insertion order, capped at `limit`.
    pub async fn list(&self, owner_id: i64, limit: i64) -> Result<Vec<VocabItem>> {
        let rows = self
            .db
            .fetch_all(
                "SELECT id, text, last_seen, strength FROM vocab \
                 WHERE owner_id = ? AND active = 1 ORDER BY id LIMIT ?",
                &[owner_id.into(), limit.into()],
            )
            .await?;
        rows.iter().map(Self::item_from).collect()
    }

    /// Soft-remove an item. Removing twice, or a foreign/nonexistent id, is a
    /// silent no-op.
    pub async fn remove(&self, owner_id: i64, id: i64) -> Result<()> {
        self.db
            .execute(
                "UPDATE vocab SET active = 0 WHERE owner_id = ? AND id = ?",
                &[owner_id.into(), id.into()],
            )
            .await
    }

    /// Select the item most in need of practice, or `None` when the chat has
    /// no active items.
    ///
    /// Composite order: never-answered items strictly first, then least
    /// recently answered, then weakest, then a uniform random draw among
    /// exact ties. SQLite lacks `NULLS FIRST`, so it sorts on a sentinel that
    /// collates before any RFC 3339 timestamp.
    pub async fn pick(&self, owner_id: i64) -> Result<Option<VocabItem>> {
        let query = match self.db.dialect() {
            Dialect::Postgres => {
                "SELECT id, text, last_seen, strength FROM vocab \
                 WHERE owner_id = ? AND active = 1 \
                 ORDER BY last_seen ASC NULLS FIRST, strength ASC, random() LIMIT 1"
            }
            Dialect::Sqlite => {
                "SELECT id, text, last_seen, strength FROM vocab \
                 WHERE owner_id = ? AND active = 1 \
                 ORDER BY COALESCE(last_seen, '0000') ASC, strength ASC, RANDOM() LIMIT 1"
            }
        };
        let row = self.db.fetch_one(query, &[owner_id.into()]).await?;
        row.as_ref().map(Self::item_from).transpose()
    }

    fn item_from(row: &SqlRow) -> Result<VocabItem> {
        Ok(VocabItem {
            id: row.integer(0)?,
            text: row.text(1)?.to_string(),
            last_seen: row.opt_text(2)?.map(str::to_string),
            strength: row.integer(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn store() -> VocabStore {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        VocabStore::new(db)
    }

    async fn mark_seen(store: &VocabStore, id: i64, when: &str, strength: i64) {
        store
            .db
            .execute(
                "UPDATE vocab SET last_seen = ?, strength = ? WHERE id = ?",
                &[when.into(), strength.into(), id.into()],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_trims_and_skips_empty() {
        let vocab = store().await;

        vocab.add(1, "  la casa  ").await.unwrap();
        vocab.add(1, "").await.unwrap();
        vocab.add(1, "   ").await.unwrap();

        let items = vocab.list(1, LIST_LIMIT).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "la casa");
        assert_eq!(items[0].strength, 0);
        assert_eq!(items[0].last_seen, None);
    }

    #[tokio::test]
    async fn test_list_orders_and_caps() {
        let vocab = store().await;
        for i in 0..5 {
            vocab.add(1, &format!("word{i}")).await.unwrap();
        }
        // another chat's items never leak in
        vocab.add(2, "other").await.unwrap();

        let items = vocab.list(1, 3).await.unwrap();
        assert_eq!(items.len(), 3);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert!(items.iter().all(|i| i.text.starts_with("word")));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let vocab = store().await;
        vocab.add(1, "gato").await.unwrap();
        vocab.add(1, "perro").await.unwrap();
        let items = vocab.list(1, LIST_LIMIT).await.unwrap();
        let removed = items[0].id;

        vocab.remove(1, removed).await.unwrap();
        vocab.remove(1, removed).await.unwrap();
        vocab.remove(1, 9999).await.unwrap();

        let remaining = vocab.list(1, LIST_LIMIT).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|i| i.id != removed));
    }

    #[tokio::test]
    async fn test_remove_ignores_foreign_owner() {
        let vocab = store().await;
        vocab.add(1, "mio").await.unwrap();
        let id = vocab.list(1, LIST_LIMIT).await.unwrap()[0].id;

        vocab.remove(2, id).await.unwrap();
        assert_eq!(vocab.list(1, LIST_LIMIT).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pick_empty_is_none() {
        let vocab = store().await;
        assert_eq!(vocab.pick(1).await.unwrap(), None);

        vocab.add(1, "solo").await.unwrap();
        let id = vocab.list(1, LIST_LIMIT).await.unwrap()[0].id;
        vocab.remove(1, id).await.unwrap();
        assert_eq!(vocab.pick(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pick_prefers_never_seen() {
        let vocab = store().await;
        vocab.add(1, "seen").await.unwrap();
        vocab.add(1, "fresh").await.unwrap();
        let items = vocab.list(1, LIST_LIMIT).await.unwrap();
        let seen_id = items.iter().find(|i| i.text == "seen").unwrap().id;
        mark_seen(&vocab, seen_id, "2026-01-05T09:00:00Z", 4).await;

        for _ in 0..10 {
            let picked = vocab.pick(1).await.unwrap().unwrap();
            assert_eq!(picked.text, "fresh");
        }
    }

    #[tokio::test]
    async fn test_pick_prefers_least_recent() {
        let vocab = store().await;
        vocab.add(1, "old").await.unwrap();
        vocab.add(1, "new").await.unwrap();
        let items = vocab.list(1, LIST_LIMIT).await.unwrap();
        let old_id = items.iter().find(|i| i.text == "old").unwrap().id;
        let new_id = items.iter().find(|i| i.text == "new").unwrap().id;
        mark_seen(&vocab, old_id, "2026-01-01T12:00:00Z", 9).await;
        mark_seen(&vocab, new_id, "2026-02-01T12:00:00Z", 0).await;

        // recency dominates strength
        let picked = vocab.pick(1).await.unwrap().unwrap();
        assert_eq!(picked.id, old_id);
    }

    #[tokio::test]
    async fn test_pick_breaks_recency_ties_by_strength() {
        let vocab = store().await;
        vocab.add(1, "weak").await.unwrap();
        vocab.add(1, "strong").await.unwrap();
        let items = vocab.list(1, LIST_LIMIT).await.unwrap();
        let weak_id = items.iter().find(|i| i.text == "weak").unwrap().id;
        let strong_id = items.iter().find(|i| i.text == "strong").unwrap().id;
        mark_seen(&vocab, weak_id, "2026-01-01T12:00:00Z", 1).await;
        mark_seen(&vocab, strong_id, "2026-01-01T12:00:00Z", 5).await;

        let picked = vocab.pick(1).await.unwrap().unwrap();
        assert_eq!(picked.id, weak_id);
    }

    #[tokio::test]
    async fn test_pick_random_tie_break_is_not_degenerate() {
        let vocab = store().await;
        vocab.add(1, "uno").await.unwrap();
        vocab.add(1, "dos").await.unwrap();

        let mut picked = HashSet::new();
        for _ in 0..50 {
            picked.insert(vocab.pick(1).await.unwrap().unwrap().id);
        }
        assert_eq!(picked.len(), 2, "equal items should both be drawn");
    }
}
