//! Networked PostgreSQL backend
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Row, TypeInfo, ValueRef};

use super::{Dialect, Gateway, SqlRow, SqlValue};
use crate::core::config::DEFAULT_TZ;
use crate::core::error::{CoachError, Result};

pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        info!("Connected to PostgreSQL");
        Ok(PostgresGateway { pool })
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<SqlRow> {
        let mut values = Vec::with_capacity(row.len());
        for idx in 0..row.len() {
            let raw = row.try_get_raw(idx)?;
            let value = if raw.is_null() {
                SqlValue::Null
            } else {
                match raw.type_info().name() {
                    "INT8" => SqlValue::Integer(row.try_get::<i64, _>(idx)?),
                    "INT4" => SqlValue::Integer(i64::from(row.try_get::<i32, _>(idx)?)),
                    "INT2" => SqlValue::Integer(i64::from(row.try_get::<i16, _>(idx)?)),
                    "TEXT" | "VARCHAR" | "BPCHAR" => {
                        SqlValue::Text(row.try_get::<String, _>(idx)?)
                    }
                    other => return Err(CoachError::Decode(other.to_string())),
                }
            };
            values.push(value);
        }
        Ok(SqlRow::new(values))
    }
}

/// Rewrite shared `?` placeholders into PostgreSQL's numbered `$n` form.
///
/// Statement text never contains a literal question mark, so a plain scan is
/// enough.
fn numbered_placeholders(statement: &str) -> String {
    let mut out = String::with_capacity(statement.len() + 8);
    let mut next = 0u32;
    for ch in statement.chars() {
        if ch == '?' {
            next += 1;
            out.push('$');
            out.push_str(&next.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    value: &'q SqlValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    match value {
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
        SqlValue::Null => query.bind(None::<String>),
    }
}

#[async_trait]
impl Gateway for PostgresGateway {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn init_schema(&self) -> Result<()> {
        self.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS users (
                   id BIGINT PRIMARY KEY,
                   tz TEXT DEFAULT '{DEFAULT_TZ}',
                   start_hour INT DEFAULT 10,
                   end_hour INT DEFAULT 21,
                   daily_count INT DEFAULT 3
                 )"
            ),
            &[],
        )
        .await?;
        self.execute(
            "CREATE TABLE IF NOT EXISTS vocab (
               id BIGSERIAL PRIMARY KEY,
               owner_id BIGINT,
               text TEXT,
               last_seen TEXT,
               strength INT DEFAULT 0,
               active INT DEFAULT 1
             )",
            &[],
        )
        .await?;
        self.execute(
            "CREATE TABLE IF NOT EXISTS answers (
               id BIGSERIAL PRIMARY KEY,
               owner_id BIGINT,
               vocab_id BIGINT,
               text TEXT,
               answered_at TEXT
             )",
            &[],
        )
        .await?;
        Ok(())
    }

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<()> {
        let sql = numbered_placeholders(statement);
        let mut query = sqlx::query(&sql);
        for param in params {
            query = bind_value(query, param);
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_one(&self, query_text: &str, params: &[SqlValue]) -> Result<Option<SqlRow>> {
        let sql = numbered_placeholders(query_text);
        let mut query = sqlx::query(&sql);
        for param in params {
            query = bind_value(query, param);
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::decode).transpose()
    }

    async fn fetch_all(&self, query_text: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>> {
        let sql = numbered_placeholders(query_text);
        let mut query = sqlx::query(&sql);
        for param in params {
            query = bind_value(query, param);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::decode).collect()
    }
}
