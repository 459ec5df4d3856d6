//! Telegram Bot API client and update loop
//!
//! A thin HTTPS client over the bot API: `sendMessage` (with a force-reply
//! markup when an answer is expected), `sendDocument`, and a `getUpdates`
//! long-polling loop that routes `/commands` into the registry and quoted
//! replies into answer recording.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::commands::{CommandContext, CommandRegistry, CommandRequest, HELP};
use crate::core::response::chunk_for_message;
use crate::transport::Transport;

/// Seconds the server holds a `getUpdates` call open.
const POLL_TIMEOUT_SECS: u64 = 50;

/// Pause after a failed poll before trying again.
const POLL_RETRY_SECS: u64 = 3;

#[derive(Clone)]
pub struct TelegramTransport {
    http: reqwest::Client,
    base: String,
}

impl TelegramTransport {
    pub fn new(bot_token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            // must outlive the long poll
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 20))
            .build()
            .context("failed to build HTTP client")?;

        Ok(TelegramTransport {
            http,
            base: format!("https://api.telegram.org/bot{bot_token}"),
        })
    }

    async fn call(&self, method: &str, payload: serde_json::Value) -> Result<()> {
        let url = format!("{}/{method}", self.base);
        let response = self.http.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{method} failed with {status}: {body}");
        }
        Ok(())
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base);
        let response: ApiResponse<Vec<Update>> = self
            .http
            .get(&url)
            .query(&[("timeout", POLL_TIMEOUT_SECS as i64), ("offset", offset)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.ok {
            anyhow::bail!("getUpdates returned ok=false");
        }
        Ok(response.result.unwrap_or_default())
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn deliver(&self, chat_id: i64, text: &str, expect_reply: bool) -> Result<()> {
        let chunks = chunk_for_message(text);
        let last = chunks.len().saturating_sub(1);
        for (idx, chunk) in chunks.into_iter().enumerate() {
            let mut payload = json!({ "chat_id": chat_id, "text": chunk });
            // solicit the reply on the chunk the user will actually answer
            if expect_reply && idx == last {
                payload["reply_markup"] = json!({ "force_reply": true });
            }
            self.call("sendMessage", payload).await?;
        }
        Ok(())
    }

    async fn deliver_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);

        let url = format!("{}/sendDocument", self.base);
        self.http
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Run the long-polling loop until the process exits.
///
/// Poll failures back off briefly and continue; per-message failures are
/// logged and answered with a generic notice.
pub async fn run_polling(
    transport: Arc<TelegramTransport>,
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
) -> Result<()> {
    info!("Starting Telegram long polling...");
    let mut offset = 0i64;
    loop {
        let updates = match transport.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("getUpdates failed: {e}");
                tokio::time::sleep(Duration::from_secs(POLL_RETRY_SECS)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.message else { continue };

            if let Err(e) = route_message(&ctx, &registry, &message).await {
                error!("Failed to handle update {}: {e}", update.update_id);
                let _ = ctx
                    .transport
                    .deliver(message.chat.id, "Something went wrong, please try again 🙈", false)
                    .await;
            }
        }
    }
}

async fn route_message(
    ctx: &Arc<CommandContext>,
    registry: &CommandRegistry,
    message: &Message,
) -> Result<()> {
    let chat_id = message.chat.id;
    let Some(text) = message.text.as_deref() else {
        return Ok(());
    };

    if let Some((name, args)) = parse_command(text) {
        debug!("Command /{name} from chat {chat_id}");
        let request = CommandRequest {
            chat_id,
            command: name.clone(),
            args,
        };
        return match registry.get(&name) {
            Some(handler) => handler.handle(Arc::clone(ctx), &request).await,
            None => ctx.transport.deliver(chat_id, HELP, false).await,
        };
    }

    // only quoted replies count as practice answers
    if message.reply_to_message.is_some() {
        debug!("Recording reply from chat {chat_id}");
        if ctx.record_reply(chat_id, text).await? {
            ctx.transport.deliver(chat_id, "Recorded ✔️", false).await?;
        }
    }
    Ok(())
}

/// Parse `/name arg1 arg2` into a lowercase command name and its arguments.
///
/// Group chats address commands as `/name@BotName`; the suffix is dropped.
/// Returns `None` for anything that is not a command.
fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    let rest = text.trim().strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    let name = name.split('@').next().unwrap_or(name).to_lowercase();
    if name.is_empty() {
        return None;
    }
    let args = parts.map(str::to_string).collect();
    Some((name, args))
}
