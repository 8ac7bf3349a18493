//! Google Translate provider for machine translation
//!
//! Two backends are supported:
//!
//! - the official Cloud Translation API v2, used when an API key is
//!   available in `GOOGLE_TRANSLATE_API_KEY`;
//! - the key-less web endpoint (`translate_a/single?client=gtx`) that
//!   browser extensions and small scripts use, as a fallback.
//!
//! # Example
//!
//! ```ignore
//! use oracle_bot::mt::{MachineTranslator, GoogleTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let result = provider.translate("Hello, world!", "en", "ru").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{
    MachineTranslator, is_auto_detect, normalize_locale, validate_locale,
};
use async_trait::async_trait;
use serde_json::json;

const CLOUD_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const WEB_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Clone)]
enum Backend {
    /// Cloud Translation API v2 with an API key
    Cloud { api_key: String },
    /// Public web endpoint, no credentials
    Web,
}

/// Google Translate provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    backend: Backend,
    /// HTTP client for async requests
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (Cloud API request limit)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a provider backed by the Cloud Translation API
    ///
    /// Fails if the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: String) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }
        Self::with_backend(Backend::Cloud { api_key }, CLOUD_API_URL)
    }

    /// Create a provider backed by the key-less web endpoint
    pub fn keyless() -> MtResult<Self> {
        Self::with_backend(Backend::Web, WEB_API_URL)
    }

    /// Pick the backend from an optional API key: Cloud when present, web otherwise
    pub fn from_key(api_key: Option<String>) -> MtResult<Self> {
        match api_key {
            Some(key) if !key.trim().is_empty() => Self::new(key),
            _ => Self::keyless(),
        }
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    ///
    /// Falls back to the key-less endpoint when the variable is unset.
    pub fn from_env() -> MtResult<Self> {
        Self::from_key(std::env::var("GOOGLE_TRANSLATE_API_KEY").ok())
    }

    /// Point the provider at a different endpoint (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn with_backend(backend: Backend, base_url: &str) -> MtResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            backend,
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Map a non-success HTTP status to an error, consuming the body for context
    async fn status_error(response: reqwest::Response) -> MtError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status.is_client_error() && status.as_u16() != 429 {
            MtError::ConfigError(format!("API client error ({}): {}", status, error_text))
        } else {
            MtError::TranslationError(format!("API server error ({}): {}", status, error_text))
        }
    }

    async fn translate_cloud(
        &self,
        api_key: &str,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let url = format!("{}?key={}", self.base_url, api_key);

        let mut body = json!({
            "q": [text],
            "target": normalize_locale(target_locale),
            "format": "text"
        });
        // Omitting "source" makes the API detect the language itself
        if !is_auto_detect(source_locale) {
            body["source"] = json!(normalize_locale(source_locale));
        }

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::TranslationError(
                    "Invalid API response: missing 'data.translations[0].translatedText'"
                        .to_string(),
                )
            })
    }

    async fn translate_web(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let source = if is_auto_detect(source_locale) {
            "auto".to_string()
        } else {
            normalize_locale(source_locale)
        };
        let target = normalize_locale(target_locale);

        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| MtError::ConfigError(format!("Invalid endpoint URL: {}", e)))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        parse_web_response(&json)
    }
}

/// Join the sentence chunks of a web endpoint response
///
/// The payload is positional: `[[["chunk", "source chunk", ...], ...], null, "en", ...]`.
fn parse_web_response(json: &serde_json::Value) -> MtResult<String> {
    let sentences = json[0].as_array().ok_or_else(|| {
        MtError::TranslationError("Invalid API response: missing sentence array".to_string())
    })?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence[0].as_str())
        .collect();

    if translated.is_empty() {
        return Err(MtError::TranslationError(
            "Invalid API response: no translated chunks".to_string(),
        ));
    }
    Ok(translated)
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.backend {
            Backend::Cloud { .. } => "cloud (key ***)",
            Backend::Web => "web",
        };
        f.debug_struct("GoogleTranslateProvider")
            .field("backend", &backend)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        match &self.backend {
            Backend::Cloud { api_key } => {
                self.translate_cloud(api_key, text, source_locale, target_locale)
                    .await
            }
            Backend::Web => self.translate_web(text, source_locale, target_locale).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self.backend {
            Backend::Cloud { .. } => "Google Translate",
            Backend::Web => "Google Translate (web)",
        }
    }
}
