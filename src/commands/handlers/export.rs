//! Answer export
//!
//! Handles: export

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, CommandRequest};
use crate::features::answers::AnswerRow;
use crate::transport::Transport;

pub struct ExportHandler;

#[async_trait]
impl CommandHandler for ExportHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["export"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, request: &CommandRequest) -> Result<()> {
        let chat_id = request.chat_id;
        let rows = ctx.answers.export(chat_id).await?;
        if rows.is_empty() {
            return ctx
                .transport
                .deliver(chat_id, "No answers yet 💾", false)
                .await;
        }

        info!("Exporting {} answer(s) for chat {chat_id}", rows.len());
        let bytes = to_csv(&rows)?;
        ctx.transport
            .deliver_document(chat_id, "answers.csv", bytes)
            .await
    }
}

/// Render answers as `answered_at_UTC,answer` CSV, newest first.
fn to_csv(rows: &[AnswerRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["answered_at_UTC", "answer"])?;
    for row in rows {
        writer.write_record([row.answered_at.as_str(), row.text.as_str()])?;
    }
    Ok(writer.into_inner()?)
}
