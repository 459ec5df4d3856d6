//! Today's schedule inspection
//!
//! Handles: when

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::transport::Transport;

pub struct WhenHandler;

#[async_trait]
impl CommandHandler for WhenHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["when"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()> {
        let times = ctx.scheduler.upcoming_today(request.chat_id).await?;
        let body = if times.is_empty() {
            "Today: nothing scheduled yet".to_string()
        } else {
            format!("Today: {}", times.join(", "))
        };
        ctx.transport.deliver(request.chat_id, &body, false).await
    }
}
