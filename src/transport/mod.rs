//! # Transport Layer
//!
//! The delivery seam between the coach core and the chat network. The core
//! consumes only [`Transport`]; everything Telegram-specific lives in
//! [`telegram`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod telegram;

use async_trait::async_trait;

pub use telegram::TelegramTransport;

/// Outbound delivery capability.
///
/// `expect_reply` asks the chat surface to solicit a quoted reply, so the
/// update loop can tell practice answers from ordinary chatter.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, chat_id: i64, text: &str, expect_reply: bool) -> anyhow::Result<()>;

    async fn deliver_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()>;
}
