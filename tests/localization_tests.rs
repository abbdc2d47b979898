//! # Localization Tests
//!
//! Message retrieval and formatting for the bundled English messages.

use dante::localization::LocalizationManager;
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.t("info");
        assert!(message.starts_with("I am Dante, the romantic."));
        assert!(message.ends_with("Carpe Diem!"));
        assert!(message.contains("\n\n"));
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message("nonexistent-key", None);
        assert_eq!(message, "Missing translation: nonexistent-key");
    }

    #[test]
    fn test_message_with_args() {
        let manager = setup_localization();

        let message = manager.t_args("usage-report", &[("count", "180118"), ("limit", "500000")]);
        assert_eq!(message, "180118 / 500000");

        let mut args = HashMap::new();
        args.insert("id", "-961117056");
        assert_eq!(manager.get_message("chat-id", Some(&args)), "-961117056");
    }

    #[test]
    fn test_multiline_message() {
        let manager = setup_localization();

        let message = manager.t("translate-usage");
        assert_eq!(
            message,
            "Usage: /t <source lang> <target lang> <text>\nExample: /t en de good morning"
        );
    }

    #[test]
    fn test_custom_source() {
        let manager = LocalizationManager::from_source("en".parse().unwrap(), "greeting = salve { $name }\n").unwrap();
        assert_eq!(manager.t_args("greeting", &[("name", "Dante")]), "salve Dante");

        assert!(LocalizationManager::from_source("en".parse().unwrap(), "= broken").is_err());
    }
}
