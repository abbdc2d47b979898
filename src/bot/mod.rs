//! Bot module for handling Telegram interactions
//!
//! - `commands`: the command set understood by the bot
//! - `message_handler`: dispatches parsed commands and builds the replies

pub mod commands;
pub mod message_handler;

use sqlx::postgres::PgPool;

use crate::config::BotConfig;
use crate::localization::LocalizationManager;
use crate::query::QueryHandler;
use crate::translate::DeepLClient;

// Re-export main handler functions for use in main.rs
pub use commands::Command;
pub use message_handler::{command_handler, query_reply, translate_reply, usage_reply};

/// Everything a command handler needs, built once at startup and shared
#[derive(Debug)]
pub struct BotState {
    pub config: BotConfig,
    pub queries: QueryHandler<PgPool>,
    pub translator: Option<DeepLClient>,
    pub messages: LocalizationManager,
}
