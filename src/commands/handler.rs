//! Command handler trait and request shape
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;

/// One parsed incoming command.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub chat_id: i64,
    /// Lowercase command name without the leading slash.
    pub command: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    /// The arguments joined back into a free-text tail.
    pub fn tail(&self) -> String {
        self.args.join(" ")
    }
}

/// Trait for command handlers.
///
/// A handler serves one or more command names and replies through the
/// context's transport.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()> {
///         ctx.transport.deliver(request.chat_id, "pong", false).await
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name(s) this handler processes.
    fn command_names(&self) -> &'static [&'static str];

    /// Handle one incoming command.
    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()>;
}
