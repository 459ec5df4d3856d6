//! # Persistence Gateway
//!
//! Uniform read/write primitives over two interchangeable SQL backends: an
//! embedded SQLite file for local runs and networked PostgreSQL for hosted
//! deployments. Higher layers speak only [`Gateway`]; shared statement text
//! uses `?` placeholders and the PostgreSQL backend rewrites them to `$n`.
//! The two statements whose text legitimately differs per backend (schema
//! DDL, NULL ordering in the pick query) branch on [`Dialect`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::Config;
use crate::core::error::{CoachError, Result};

/// Which SQL dialect a gateway speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

/// A statement parameter.
///
/// The schema only ever stores integers and text (timestamps are RFC 3339
/// UTC text in both backends), so three variants cover every statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// One positional result row.
#[derive(Debug, Clone)]
pub struct SqlRow(Vec<SqlValue>);

impl SqlRow {
    pub fn new(values: Vec<SqlValue>) -> Self {
        SqlRow(values)
    }

    fn value(&self, idx: usize) -> Result<&SqlValue> {
        self.0
            .get(idx)
            .ok_or_else(|| CoachError::Decode(format!("no column {idx}")))
    }

    pub fn integer(&self, idx: usize) -> Result<i64> {
        match self.value(idx)? {
            SqlValue::Integer(v) => Ok(*v),
            other => Err(CoachError::Decode(format!(
                "column {idx}: expected integer, got {other:?}"
            ))),
        }
    }

    pub fn text(&self, idx: usize) -> Result<&str> {
        match self.value(idx)? {
            SqlValue::Text(v) => Ok(v),
            other => Err(CoachError::Decode(format!(
                "column {idx}: expected text, got {other:?}"
            ))),
        }
    }

    pub fn opt_text(&self, idx: usize) -> Result<Option<&str>> {
        match self.value(idx)? {
            SqlValue::Text(v) => Ok(Some(v)),
            SqlValue::Null => Ok(None),
            other => Err(CoachError::Decode(format!(
                "column {idx}: expected text or null, got {other:?}"
            ))),
        }
    }
}

/// The persistence contract every backend implements.
///
/// Each call acquires its own connection from the backend pool; there are no
/// cross-call transactions. Failures surface as the Storage error kind and
/// are never retried here.
#[async_trait]
pub trait Gateway: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Create the three tables if they do not exist yet.
    async fn init_schema(&self) -> Result<()>;

    /// Run a write statement, discarding any result.
    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<()>;

    /// Run a query expected to produce zero or one row.
    async fn fetch_one(&self, query: &str, params: &[SqlValue]) -> Result<Option<SqlRow>>;

    /// Run a query producing an ordered sequence of rows.
    async fn fetch_all(&self, query: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>>;
}

/// Cheap-to-clone handle over the active backend.
#[derive(Clone)]
pub struct Database {
    gateway: Arc<dyn Gateway>,
}

impl Database {
    /// Pick the backend from configuration: PostgreSQL when a recognized
    /// `DATABASE_URL` is present, the embedded SQLite file otherwise.
    pub async fn connect(config: &Config) -> Result<Self> {
        let gateway: Arc<dyn Gateway> = match &config.database_url {
            Some(url) => Arc::new(postgres::PostgresGateway::connect(url).await?),
            None => Arc::new(sqlite::SqliteGateway::open(&config.db_path).await?),
        };
        Ok(Database { gateway })
    }

    /// In-memory SQLite database; used by tests.
    pub async fn in_memory() -> Result<Self> {
        Ok(Database {
            gateway: Arc::new(sqlite::SqliteGateway::in_memory().await?),
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.gateway.dialect()
    }

    pub async fn init_schema(&self) -> Result<()> {
        self.gateway.init_schema().await
    }

    pub async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<()> {
        self.gateway.execute(statement, params).await
    }

    pub async fn fetch_one(&self, query: &str, params: &[SqlValue]) -> Result<Option<SqlRow>> {
        self.gateway.fetch_one(query, params).await
    }

    pub async fn fetch_all(&self, query: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>> {
        self.gateway.fetch_all(query, params).await
    }
}
