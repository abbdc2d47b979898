use anyhow::{anyhow, Result};
use async_trait::async_trait;
use dante::bot::{query_reply, translate_reply, usage_reply, Command};
use dante::db::DictionaryEntry;
use dante::localization::LocalizationManager;
use dante::query::{QueryHandler, QUERY_USAGE};
use dante::store::{DictionaryStore, InMemoryStore};
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    fn absent() -> DictionaryEntry {
        DictionaryEntry {
            english: "absent".to_string(),
            latin: "absens".to_string(),
            definition: "(adj) not present".to_string(),
            french_equivalent: "absent".to_string(),
            spanish_equivalent: "ausente".to_string(),
            italian_equivalent: "assente".to_string(),
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl DictionaryStore for BrokenStore {
        async fn load_all(&self) -> Result<Vec<DictionaryEntry>> {
            Ok(vec![absent()])
        }

        async fn fetch_entry(&self, _english: &str) -> Result<Option<DictionaryEntry>> {
            Err(anyhow!("pool timed out"))
        }
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(
            Command::parse("/q foo bar absent", "dante_bot").unwrap(),
            Command::Q("foo bar absent".to_string())
        );
        assert_eq!(
            Command::parse("/t en de good morning", "dante_bot").unwrap(),
            Command::T("en de good morning".to_string())
        );
        assert_eq!(Command::parse("/info", "dante_bot").unwrap(), Command::Info);
        assert_eq!(Command::parse("/id", "dante_bot").unwrap(), Command::Id);
        assert!(Command::parse("/p lorem ipsum", "dante_bot").is_err());
    }

    #[test]
    fn test_command_descriptions_list_query() {
        let help = Command::descriptions().to_string();
        assert!(help.contains("/q"));
        assert!(help.contains("/t"));
    }

    #[tokio::test]
    async fn test_query_reply() {
        let messages = messages();
        let queries = QueryHandler::from_store(InMemoryStore::new(vec![absent()]))
            .await
            .unwrap();

        let reply = query_reply(&queries, &messages, "foo bar absent").await;
        assert!(reply.starts_with("Here's what I found for absent,"));

        assert_eq!(query_reply(&queries, &messages, "zzzznotaword").await, "None");
        assert_eq!(query_reply(&queries, &messages, "").await, QUERY_USAGE);
    }

    #[tokio::test]
    async fn test_query_reply_reports_storage_failure() {
        let messages = messages();
        let queries = QueryHandler::from_store(BrokenStore).await.unwrap();

        let reply = query_reply(&queries, &messages, "absent").await;
        assert_eq!(reply, messages.t("lookup-failed"));
    }

    #[tokio::test]
    async fn test_translate_reply_argument_errors() {
        let messages = messages();

        assert_eq!(translate_reply(None, &messages, "en de   ").await, messages.t("translate-usage"));
        assert_eq!(
            translate_reply(None, &messages, "xx de good morning").await,
            messages.t_args("translate-unknown-source", &[("code", "xx")])
        );
        assert_eq!(
            translate_reply(None, &messages, "en qq good morning").await,
            messages.t_args("translate-unknown-target", &[("code", "qq")])
        );
    }

    #[tokio::test]
    async fn test_translate_without_key() {
        let messages = messages();

        let reply = translate_reply(None, &messages, "en de good morning").await;
        assert_eq!(reply, messages.t("translate-unavailable"));

        let reply = usage_reply(None, &messages).await;
        assert_eq!(reply, messages.t("translate-unavailable"));
    }
}
