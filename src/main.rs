use anyhow::{Context, Result};
use dante::bot::{self, BotState, Command};
use dante::config::BotConfig;
use dante::localization::LocalizationManager;
use dante::query::QueryHandler;
use dante::translate::DeepLClient;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging, LOG_FORMAT=json for machine readable output
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting Dante Telegram Bot");

    let config = BotConfig::from_env()?;

    info!(max_connections = config.max_connections, "Connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    dante::db::init_database_schema(&pool).await?;

    // Snapshot the dictionary once; the index is not refreshed while running
    let queries = QueryHandler::from_store(pool).await?;
    info!(words = queries.index().len(), "Dictionary index ready");

    let translator = config
        .deepl_api_key
        .as_deref()
        .map(DeepLClient::new)
        .transpose()
        .context("Failed to build DeepL client")?;
    if translator.is_none() {
        warn!("DEEPL_API_KEY not set, translation commands are disabled");
    }

    if config.allowed_chats.is_empty() {
        warn!("ALLOWED_CHAT_IDS not set, answering every chat");
    }

    let bot = Bot::new(&config.telegram_token);
    let state = Arc::new(BotState {
        config,
        queries,
        translator,
        messages: LocalizationManager::new()?,
    });

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(bot::command_handler);

    // A single distribution key: commands are handled one at a time
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .distribution_function(|_| Some(()))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
