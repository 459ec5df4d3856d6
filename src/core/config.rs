//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};

/// Zone assumed for users who never set one.
pub const DEFAULT_TZ: &str = "Europe/Kyiv";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API token (`TELEGRAM_BOT_TOKEN`).
    pub bot_token: String,
    /// PostgreSQL connection string, when present and recognizable
    /// (`DATABASE_URL`). Absent means the embedded SQLite backend.
    pub database_url: Option<String>,
    /// SQLite file path for local runs (`DB_PATH`).
    pub db_path: String,
    /// Health endpoint port (`PORT`).
    pub port: u16,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Only the bot token is required; everything else has a local-run
    /// default.
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN is not set")?;

        let database_url = postgres_url(std::env::var("DATABASE_URL").ok());

        let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "vocabcoach.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "10000".to_string())
            .parse::<u16>()
            .context("PORT must be a port number")?;

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            bot_token,
            database_url,
            db_path,
            port,
            log_level,
        })
    }
}

/// Accept `DATABASE_URL` only when it actually points at PostgreSQL.
///
/// Hosting platforms leave the variable defined but empty, or pointing at
/// something else entirely; anything unrecognized falls back to SQLite.
fn postgres_url(raw: Option<String>) -> Option<String> {
    let url = raw?.trim().to_string();
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Some(url)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_url_accepted() {
        let url = postgres_url(Some("postgres://u:p@host/db".to_string()));
        assert_eq!(url.as_deref(), Some("postgres://u:p@host/db"));

        let url = postgres_url(Some("  postgresql://host/db ".to_string()));
        assert_eq!(url.as_deref(), Some("postgresql://host/db"));
    }

    #[test]
    fn test_postgres_url_rejected() {
        assert_eq!(postgres_url(None), None);
        assert_eq!(postgres_url(Some(String::new())), None);
        assert_eq!(postgres_url(Some("mysql://host/db".to_string())), None);
        assert_eq!(postgres_url(Some("   ".to_string())), None);
    }
}
