//! # Translation Module
//!
//! Parsing of the `/t <source> <target> <text>` command and a small client for
//! the DeepL REST API (`/v2/translate` and `/v2/usage`).

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const DEEPL_FREE_URL: &str = "https://api-free.deepl.com";
pub const DEEPL_PRO_URL: &str = "https://api.deepl.com";
pub const DEFAULT_FORMALITY: &str = "prefer_less";
pub const REQUEST_TIMEOUT_SECS: u64 = 15; // whole request, commands are handled one at a time
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Languages DeepL accepts as a translation source
const SOURCE_LANGS: &[&str] = &[
    "AR", "BG", "CS", "DA", "DE", "EL", "EN", "ES", "ET", "FI", "FR", "HU", "ID", "IT", "JA", "KO",
    "LT", "LV", "NB", "NL", "PL", "PT", "RO", "RU", "SK", "SL", "SV", "TR", "UK", "ZH",
];

/// Target-only regional variants; every source language is also a valid target
const TARGET_VARIANTS: &[&str] = &["EN-GB", "EN-US", "PT-BR", "PT-PT", "ZH-HANS", "ZH-HANT"];

lazy_static! {
    // src two letters, trg 2-5 chars, phrase starts with two non-space chars
    static ref TRANSLATE_ARGS: Regex =
        Regex::new(r"(?s)^([A-Za-z]{2})[, ]([A-Za-z\-]{2,5}) (\S{2}.*)$")
            .expect("Translate argument pattern should be valid");
}

/// An upper-cased DeepL language code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lang(String);

impl Lang {
    pub fn source(code: &str) -> Option<Self> {
        let code = code.to_uppercase();
        SOURCE_LANGS.contains(&code.as_str()).then_some(Lang(code))
    }

    pub fn target(code: &str) -> Option<Self> {
        let code = code.to_uppercase();
        let known = TARGET_VARIANTS.contains(&code.as_str())
            || SOURCE_LANGS.contains(&code.as_str());
        known.then_some(Lang(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

/// A parsed `/t` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source: Lang,
    pub target: Lang,
    pub text: String,
}

/// Reasons a `/t` command could not be turned into a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateCommandError {
    Usage,
    UnknownSourceLang(String),
    UnknownTargetLang(String),
}

impl std::fmt::Display for TranslateCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateCommandError::Usage => write!(f, "Malformed translate command"),
            TranslateCommandError::UnknownSourceLang(code) => write!(f, "Unknown source language: {code}"),
            TranslateCommandError::UnknownTargetLang(code) => write!(f, "Unknown target language: {code}"),
        }
    }
}

impl std::error::Error for TranslateCommandError {}

/// Parse the arguments following `/t`, e.g. `en de good morning`
pub fn parse_translation_args(args: &str) -> Result<TranslationRequest, TranslateCommandError> {
    let Some(caps) = TRANSLATE_ARGS.captures(args.trim()) else {
        return Err(TranslateCommandError::Usage);
    };

    let source = Lang::source(&caps[1])
        .ok_or_else(|| TranslateCommandError::UnknownSourceLang(caps[1].to_string()))?;
    let target = Lang::target(&caps[2])
        .ok_or_else(|| TranslateCommandError::UnknownTargetLang(caps[2].to_string()))?;

    Ok(TranslationRequest {
        source,
        target,
        text: caps[3].to_string(),
    })
}

/// Errors returned by the DeepL client
#[derive(Debug)]
pub enum TranslateError {
    /// Transport or decoding failure
    Http(reqwest::Error),
    /// DeepL answered with a non-success status
    Api { status: u16, message: String },
    /// DeepL answered without any translation
    EmptyResponse,
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Http(e) => write!(f, "HTTP error: {e}"),
            TranslateError::Api { status, message } => write!(f, "DeepL error {status}: {message}"),
            TranslateError::EmptyResponse => write!(f, "DeepL returned no translations"),
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Http(err)
    }
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    text: [&'a str; 1],
    source_lang: &'a str,
    target_lang: &'a str,
    formality: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Character usage for the current billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub character_count: u64,
    pub character_limit: u64,
}

/// Pick the API host for a key; free-tier keys end in `:fx`
pub fn base_url_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        DEEPL_FREE_URL
    } else {
        DEEPL_PRO_URL
    }
}

/// Minimal DeepL API client
#[derive(Debug, Clone)]
pub struct DeepLClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl DeepLClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, TranslateError> {
        let api_key = api_key.into();
        let base_url = base_url_for_key(&api_key).to_string();
        Self::with_base_url(api_key, base_url)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, TranslateError> {
        Self::with_timeout(api_key, base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Client whose requests give up after `timeout`
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS)))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, TranslateError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(TranslateError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Translate `request.text`, returning the first translation
    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        info!(
            source_lang = request.source.code(),
            target_lang = request.target.code(),
            chars = request.text.chars().count(),
            "Requesting translation"
        );

        let body = TranslateBody {
            text: [request.text.as_str()],
            source_lang: request.source.code(),
            target_lang: request.target.code(),
            formality: DEFAULT_FORMALITY,
        };

        let response = self
            .http
            .post(format!("{}/v2/translate", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await?;

        let parsed: TranslateResponse = Self::check(response).await?.json().await?;
        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or(TranslateError::EmptyResponse)
    }

    /// Character usage of the account behind the key
    pub async fn usage(&self) -> Result<Usage, TranslateError> {
        let response = self
            .http
            .get(format!("{}/v2/usage", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let usage: Usage = Self::check(response).await?.json().await?;
        debug!(count = usage.character_count, limit = usage.character_limit, "Fetched DeepL usage");
        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_body_shape() {
        let body = TranslateBody {
            text: ["good morning"],
            source_lang: "EN",
            target_lang: "DE",
            formality: DEFAULT_FORMALITY,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": ["good morning"],
                "source_lang": "EN",
                "target_lang": "DE",
                "formality": "prefer_less"
            })
        );
    }

    #[test]
    fn test_translate_response_decoding() {
        let raw = r#"{"translations":[{"detected_source_language":"IT","text":"What would intelligence be without the human touch?"}]}"#;
        let parsed: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.translations.len(), 1);
        assert_eq!(
            parsed.translations[0].text,
            "What would intelligence be without the human touch?"
        );

        let usage: Usage = serde_json::from_str(r#"{"character_count":180118,"character_limit":1250000}"#).unwrap();
        assert_eq!(usage.character_count, 180118);
        assert_eq!(usage.character_limit, 1250000);
    }
}
