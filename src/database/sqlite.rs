//! Embedded SQLite backend
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use log::info;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Row, TypeInfo, ValueRef};

use super::{Dialect, Gateway, SqlRow, SqlValue};
use crate::core::config::DEFAULT_TZ;
use crate::core::error::{CoachError, Result};

pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &str) -> Result<Self> {
        let url = format!("sqlite://{path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    // WAL so timer callbacks and command handlers interleave
                    sqlx::query("PRAGMA journal_mode = WAL").execute(conn).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await?;

        info!("Opened SQLite database at {path}");
        Ok(SqliteGateway { pool })
    }

    /// Private in-memory database on a single pinned connection.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect("sqlite::memory:")
            .await?;
        Ok(SqliteGateway { pool })
    }

    fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<SqlRow> {
        let mut values = Vec::with_capacity(row.len());
        for idx in 0..row.len() {
            let raw = row.try_get_raw(idx)?;
            let value = if raw.is_null() {
                SqlValue::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" => SqlValue::Integer(row.try_get(idx)?),
                    "TEXT" => SqlValue::Text(row.try_get(idx)?),
                    other => return Err(CoachError::Decode(other.to_string())),
                }
            };
            values.push(value);
        }
        Ok(SqlRow::new(values))
    }
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    match value {
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
        SqlValue::Null => query.bind(None::<String>),
    }
}

#[async_trait]
impl Gateway for SqliteGateway {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn init_schema(&self) -> Result<()> {
        self.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS users (
                   id INTEGER PRIMARY KEY,
                   tz TEXT DEFAULT '{DEFAULT_TZ}',
                   start_hour INTEGER DEFAULT 10,
                   end_hour INTEGER DEFAULT 21,
                   daily_count INTEGER DEFAULT 3
                 )"
            ),
            &[],
        )
        .await?;
        self.execute(
            "CREATE TABLE IF NOT EXISTS vocab (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               owner_id INTEGER,
               text TEXT,
               last_seen TEXT,
               strength INTEGER DEFAULT 0,
               active INTEGER DEFAULT 1
             )",
            &[],
        )
        .await?;
        self.execute(
            "CREATE TABLE IF NOT EXISTS answers (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               owner_id INTEGER,
               vocab_id INTEGER,
               text TEXT,
               answered_at TEXT
             )",
            &[],
        )
        .await?;
        Ok(())
    }

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<()> {
        let mut query = sqlx::query(statement);
        for param in params {
            query = bind_value(query, param);
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_one(&self, query_text: &str, params: &[SqlValue]) -> Result<Option<SqlRow>> {
        let mut query = sqlx::query(query_text);
        for param in params {
            query = bind_value(query, param);
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::decode).transpose()
    }

    async fn fetch_all(&self, query_text: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>> {
        let mut query = sqlx::query(query_text);
        for param in params {
            query = bind_value(query, param);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::decode).collect()
    }
}
