//! Message Handler module for processing incoming Telegram commands

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};

use crate::localization::LocalizationManager;
use crate::query::QueryHandler;
use crate::store::DictionaryStore;
use crate::translate::{parse_translation_args, DeepLClient, TranslateCommandError};

use super::{BotState, Command};

/// Reply text for a `/q` request; storage failures become a localized apology
pub async fn query_reply<S: DictionaryStore>(
    queries: &QueryHandler<S>,
    messages: &LocalizationManager,
    args: &str,
) -> String {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    debug!(candidates = tokens.len(), "Handling dictionary query");

    match queries.handle(tokens.as_slice()).await {
        Ok(reply) => reply.to_string(),
        Err(e) => {
            error!(error = %e, "Dictionary lookup failed");
            messages.t("lookup-failed")
        }
    }
}

/// Reply text for a `/t` request
pub async fn translate_reply(
    translator: Option<&DeepLClient>,
    messages: &LocalizationManager,
    args: &str,
) -> String {
    let request = match parse_translation_args(args) {
        Ok(request) => request,
        Err(TranslateCommandError::Usage) => return messages.t("translate-usage"),
        Err(TranslateCommandError::UnknownSourceLang(code)) => {
            return messages.t_args("translate-unknown-source", &[("code", code.as_str())])
        }
        Err(TranslateCommandError::UnknownTargetLang(code)) => {
            return messages.t_args("translate-unknown-target", &[("code", code.as_str())])
        }
    };

    let Some(translator) = translator else {
        return messages.t("translate-unavailable");
    };

    match translator.translate(&request).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "DeepL translate returned an error");
            messages.t("translate-failed")
        }
    }
}

/// Reply text for a `/u` request
pub async fn usage_reply(translator: Option<&DeepLClient>, messages: &LocalizationManager) -> String {
    let Some(translator) = translator else {
        return messages.t("translate-unavailable");
    };

    match translator.usage().await {
        Ok(usage) => {
            let count = usage.character_count.to_string();
            let limit = usage.character_limit.to_string();
            messages.t_args("usage-report", &[("count", count.as_str()), ("limit", limit.as_str())])
        }
        Err(e) => {
            warn!(error = %e, "DeepL usage returned an error");
            messages.t("translate-failed")
        }
    }
}

pub async fn command_handler(bot: Bot, msg: Message, cmd: Command, state: Arc<BotState>) -> Result<()> {
    let chat_id = msg.chat.id;

    // `/id` is answered everywhere so operators can fill in the allow-list
    if cmd != Command::Id && !state.config.is_authorized(chat_id.0) {
        debug!(chat_id = %chat_id, "Ignoring command from unauthorized chat");
        return Ok(());
    }

    info!(chat_id = %chat_id, command = ?cmd, "Received command");

    let reply = match cmd {
        Command::Start | Command::H | Command::Help => Command::descriptions().to_string(),
        Command::Info => state.messages.t("info"),
        Command::Q(args) => query_reply(&state.queries, &state.messages, &args).await,
        Command::T(args) => translate_reply(state.translator.as_ref(), &state.messages, &args).await,
        Command::U => usage_reply(state.translator.as_ref(), &state.messages).await,
        Command::Id => {
            let id = chat_id.0.to_string();
            state.messages.t_args("chat-id", &[("id", id.as_str())])
        }
    };

    bot.send_message(chat_id, reply).await?;
    Ok(())
}
