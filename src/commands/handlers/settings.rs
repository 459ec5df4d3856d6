//! Reminder window settings
//!
//! Handles: settings

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::transport::Transport;

pub struct SettingsHandler;

#[async_trait]
impl CommandHandler for SettingsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["settings"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()> {
        let chat_id = request.chat_id;
        let profile = ctx.users.get_or_create(chat_id).await?;

        if let Some((count, start, end, tz_arg)) = parse_args(&request.args) {
            let tz = tz_arg.unwrap_or_else(|| profile.tz.clone());
            match ctx.users.update_settings(chat_id, count, start, end, &tz).await {
                Ok(()) => {
                    info!("Updated settings for chat {chat_id}: {count}/day {start}-{end} {tz}");
                    ctx.transport
                        .deliver(
                            chat_id,
                            &format!("Updated: {count} time(s)/day, {start}:00–{end}:00, tz: {tz}"),
                            false,
                        )
                        .await?;
                    ctx.scheduler.plan_day(chat_id).await?;
                    return Ok(());
                }
                Err(e) if e.is_validation() => {
                    return ctx
                        .transport
                        .deliver(chat_id, &format!("⚠️ {e}"), false)
                        .await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let usage = format!(
            "Usage: /settings <count> <start> <end> [timezone]\n\
             Current: {} time(s)/day, {}:00–{}:00, tz: {}",
            profile.daily_count, profile.start_hour, profile.end_hour, profile.tz
        );
        ctx.transport.deliver(chat_id, &usage, false).await
    }
}

/// Parse `<count> <start> <end> [timezone]`; `None` on too few or
/// non-numeric arguments.
fn parse_args(args: &[String]) -> Option<(i64, i64, i64, Option<String>)> {
    if args.len() < 3 {
        return None;
    }
    let count = args[0].parse().ok()?;
    let start = args[1].parse().ok()?;
    let end = args[2].parse().ok()?;
    Some((count, start, end, args.get(3).cloned()))
}
