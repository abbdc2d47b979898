use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for the Dante bot
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for LocalizationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationManager").finish_non_exhaustive()
    }
}

impl LocalizationManager {
    /// Create a localization manager with the bundled English messages
    pub fn new() -> Result<Self> {
        let locale: LanguageIdentifier = "en".parse()?;
        Self::from_source(locale, EN_MESSAGES)
    }

    /// Create a localization manager from Fluent source text
    pub fn from_source(locale: LanguageIdentifier, source: &str) -> Result<Self> {
        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse messages for {locale}: {errors:?}"))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Replies are plain text, skip the unicode isolation marks around placeables
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to load messages for {locale}: {errors:?}"))?;

        Ok(Self { bundle })
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (k, v) in args {
                fluent_args.set(*k, FluentValue::from(*v));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = self
            .bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            log::warn!("Errors formatting message '{}': {:?}", key, errors);
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }

    /// Convenience function to get a localized message
    pub fn t(&self, key: &str) -> String {
        self.get_message(key, None)
    }

    /// Convenience function to get a localized message with arguments
    pub fn t_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.get_message_with_args(key, args)
    }
}
