use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use vocabcoach::commands::handlers::create_all_handlers;
use vocabcoach::commands::{CommandContext, CommandRegistry};
use vocabcoach::core::Config;
use vocabcoach::database::Database;
use vocabcoach::features::health;
use vocabcoach::features::reminders::ReminderScheduler;
use vocabcoach::features::users::UserStore;
use vocabcoach::features::vocab::VocabStore;
use vocabcoach::transport::telegram::{run_polling, TelegramTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting vocab coach bot...");

    let database = Database::connect(&config).await?;
    database.init_schema().await?;

    let transport = Arc::new(TelegramTransport::new(&config.bot_token)?);

    let scheduler = ReminderScheduler::new(
        UserStore::new(database.clone()),
        VocabStore::new(database.clone()),
        transport.clone(),
    );

    let ctx = Arc::new(CommandContext::new(database, scheduler, transport.clone()));

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }
    info!("Registered {} command(s)", registry.len());

    // Liveness endpoint so the hosting platform sees an open port
    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            error!("Health endpoint failed: {e}");
        }
    });

    info!("📡 Bot started. Press Ctrl+C to stop.");
    run_polling(transport, ctx, registry).await
}
