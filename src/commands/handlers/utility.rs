//! Onboarding and help commands
//!
//! Handles: start, help

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::commands::HELP;
use crate::transport::Transport;

pub struct UtilityHandler;

#[async_trait]
impl CommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "help"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()> {
        match request.command.as_str() {
            "start" => self.handle_start(&ctx, request).await,
            "help" => ctx.transport.deliver(request.chat_id, HELP, false).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /start - ensure the profile exists and plan today's prompts.
    async fn handle_start(&self, ctx: &CommandContext, request: &CommandRequest) -> Result<()> {
        let chat_id = request.chat_id;
        ctx.users.get_or_create(chat_id).await?;
        info!("Chat {chat_id} started");

        let greeting =
            format!("Hi! I'll ping you a few times a day to practice your words.\n{HELP}");
        ctx.transport.deliver(chat_id, &greeting, false).await?;

        ctx.scheduler.plan_day(chat_id).await?;
        Ok(())
    }
}
