//! Vocabulary commands
//!
//! Handles: add, list, remove

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::features::vocab::LIST_LIMIT;
use crate::transport::Transport;

pub struct VocabHandler;

#[async_trait]
impl CommandHandler for VocabHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add", "list", "remove"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()> {
        match request.command.as_str() {
            "add" => self.handle_add(&ctx, request).await,
            "list" => self.handle_list(&ctx, request).await,
            "remove" => self.handle_remove(&ctx, request).await,
            _ => Ok(()),
        }
    }
}

impl VocabHandler {
    /// Handle /add - store a new word or phrase.
    async fn handle_add(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<()> {
        let text = request.tail();
        let text = text.trim();
        if text.is_empty() {
            return ctx
                .transport
                .deliver(request.chat_id, "Usage: /add <word or phrase>", false)
                .await;
        }

        ctx.vocab.add(request.chat_id, text).await?;
        ctx.transport
            .deliver(request.chat_id, &format!("Added: {text}"), false)
            .await
    }

    /// Handle /list - show the first items with their last-seen stamps.
    async fn handle_list(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<()> {
        let items = ctx.vocab.list(request.chat_id, LIST_LIMIT).await?;
        if items.is_empty() {
            return ctx
                .transport
                .deliver(request.chat_id, "Your list is empty", false)
                .await;
        }

        let lines: Vec<String> = items
            .iter()
            .map(|item| {
                let seen = item.last_seen.as_deref().unwrap_or("—");
                format!("{}. {} (seen: {seen})", item.id, item.text)
            })
            .collect();
        ctx.transport
            .deliver(request.chat_id, &lines.join("\n"), false)
            .await
    }

    /// Handle /remove - soft-delete one item by id.
    async fn handle_remove(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<()> {
        let id = request.args.first().and_then(|arg| arg.parse::<i64>().ok());
        let Some(id) = id else {
            return ctx
                .transport
                .deliver(request.chat_id, "Usage: /remove <id>  (see /list)", false)
                .await;
        };

        ctx.vocab.remove(request.chat_id, id).await?;
        ctx.transport.deliver(request.chat_id, "Removed", false).await
    }
}
