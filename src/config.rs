//! # Bot Configuration Module
//!
//! Runtime settings for the bot, read from the environment (optionally
//! populated from a `.env` file by the caller).

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration for the Telegram bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub telegram_token: String,
    /// PostgreSQL connection string
    pub database_url: String,
    /// DeepL API key; translation commands are disabled without one
    pub deepl_api_key: Option<String>,
    /// Chats allowed to talk to the bot; empty allows every chat
    pub allowed_chats: Vec<i64>,
    /// Size of the database connection pool
    pub max_connections: u32,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let telegram_token = env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let deepl_api_key = env::var("DEEPL_API_KEY").ok().filter(|k| !k.trim().is_empty());

        let allowed_chats = match env::var("ALLOWED_CHAT_IDS") {
            Ok(raw) => parse_chat_ids(&raw)?,
            Err(_) => Vec::new(),
        };

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {raw}"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            telegram_token,
            database_url,
            deepl_api_key,
            allowed_chats,
            max_connections,
        })
    }

    /// Whether messages from `chat_id` should be answered
    pub fn is_authorized(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }
}

/// Parse a comma separated list of chat ids, e.g. `2027093603,-961117056`
pub fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().with_context(|| format!("Invalid chat id: {s}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(allowed_chats: Vec<i64>) -> BotConfig {
        BotConfig {
            telegram_token: "token".to_string(),
            database_url: "postgres://localhost/dante".to_string(),
            deepl_api_key: None,
            allowed_chats,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    #[test]
    fn test_parse_chat_ids() {
        assert_eq!(parse_chat_ids("2027093603, -961117056").unwrap(), vec![2027093603, -961117056]);
        assert_eq!(parse_chat_ids("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_chat_ids("1,,2,").unwrap(), vec![1, 2]);
        assert!(parse_chat_ids("12,abc").is_err());
    }

    #[test]
    fn test_authorization() {
        let open = config(vec![]);
        assert!(open.is_authorized(42));

        let closed = config(vec![-961117056]);
        assert!(closed.is_authorized(-961117056));
        assert!(!closed.is_authorized(42));
    }
}
