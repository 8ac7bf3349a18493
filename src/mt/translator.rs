//! Machine Translation trait and locale helpers
//!
//! The oracle talks to its translation service only through the
//! `MachineTranslator` trait, so the answer pipeline can run against the
//! Google provider in production and against `MockTranslator` in tests.
//!
//! # Example
//!
//! ```ignore
//! use oracle_bot::mt::{MachineTranslator, GoogleTranslateProvider, AUTO_DETECT};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let english = provider.translate("Привет, мир", AUTO_DETECT, "en").await?;
//!     println!("{}", english);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Source locale meaning "let the provider detect the language"
pub const AUTO_DETECT: &str = "auto";

/// Generic trait for machine translation providers
///
/// Implementations handle the actual translation work, whether through an
/// HTTP API (Google Translate) or deterministic logic (Mock).
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code, or [`AUTO_DETECT`]
    /// * `target_locale` - Target language code (e.g., "ru", "en")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - If translation fails for any reason
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Name of this provider, used in logs
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// - `en-US` → `en`
/// - `zh-Hans` → `zh`
/// - `RU` → `ru`
pub fn normalize_locale(locale: &str) -> String {
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Locale codes may only contain ASCII alphanumerics, hyphens and
/// underscores. [`AUTO_DETECT`] passes this check.
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

/// Whether a source locale asks for auto-detection
pub fn is_auto_detect(locale: &str) -> bool {
    locale.eq_ignore_ascii_case(AUTO_DETECT)
}
