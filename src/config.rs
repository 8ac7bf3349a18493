//! Configuration for the answer pipeline and for the bot process
//!
//! [`AnswerConfig`] holds every knob of the answer pipeline; its defaults
//! reproduce the oracle's classic behavior. [`BotConfig`] is what the binary
//! reads from the environment (and, equivalently, from flags).

use crate::telegram::DEFAULT_API_URL;
use clap::{ArgAction, Parser};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Lowercase Russian alphabet used for synthetic words and the script check
pub const CYRILLIC_SYMBOLS: &str = "йцукенгшщзхъёэждлорпавыфячсмитьбю";

/// Reply used when no attempt produced an acceptable translation
pub const FALLBACK_SENTENCE: &str = "Истину знает только Бог.";

/// Reply to the `/start` command
pub const GREETING: &str = "Задай вопрос. Познай ответ.";

/// The single command the bot recognizes
pub const START_COMMAND: &str = "/start";

/// Errors raised by [`AnswerConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A range has no values in it
    EmptyRange(&'static str),
    /// The symbol set has no characters
    EmptySymbols,
    /// A numeric setting must be positive
    Zero(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyRange(name) => write!(f, "Range '{}' is empty", name),
            ConfigError::EmptySymbols => write!(f, "Symbol set is empty"),
            ConfigError::Zero(name) => write!(f, "'{}' must be greater than zero", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables of the answer pipeline
#[derive(Debug, Clone)]
pub struct AnswerConfig {
    /// Maximum number of scramble-and-translate rounds per message
    pub translate_attempts: usize,
    /// Alphabet of the target script, lowercase
    pub symbols: String,
    /// How many synthetic words to generate per attempt
    pub generated_word_count: RangeInclusive<usize>,
    /// Length, in symbols, of each synthetic word
    pub generated_word_length: RangeInclusive<usize>,
    /// How many of the longest real words to keep from the message
    pub message_word_count: RangeInclusive<usize>,
    /// Shared-run length from which a translation counts as "not translated enough"
    pub overlap_threshold: usize,
    /// Language the incoming message is translated to before word selection
    pub intermediate_locale: String,
    /// Language the scrambled candidate is claimed to be in
    pub candidate_source_locale: String,
    /// Language of the final reply
    pub reply_locale: String,
    /// Upper bound on a single translation call
    pub translation_timeout: Duration,
    pub greeting: String,
    pub fallback: String,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            translate_attempts: 5,
            symbols: CYRILLIC_SYMBOLS.to_string(),
            generated_word_count: 5..=11,
            generated_word_length: 3..=5,
            message_word_count: 1..=4,
            overlap_threshold: 10,
            intermediate_locale: "en".to_string(),
            // Claiming Luxembourgish makes the service mangle the mix in interesting ways
            candidate_source_locale: "lb".to_string(),
            reply_locale: "ru".to_string(),
            translation_timeout: Duration::from_secs(15),
            greeting: GREETING.to_string(),
            fallback: FALLBACK_SENTENCE.to_string(),
        }
    }
}

impl AnswerConfig {
    /// Check that every range can be sampled and every count is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::EmptySymbols);
        }
        if self.translate_attempts == 0 {
            return Err(ConfigError::Zero("translate_attempts"));
        }
        if self.overlap_threshold == 0 {
            return Err(ConfigError::Zero("overlap_threshold"));
        }
        if self.generated_word_count.is_empty() {
            return Err(ConfigError::EmptyRange("generated_word_count"));
        }
        if self.generated_word_length.is_empty() {
            return Err(ConfigError::EmptyRange("generated_word_length"));
        }
        if *self.generated_word_length.start() == 0 {
            return Err(ConfigError::Zero("generated_word_length"));
        }
        if self.message_word_count.is_empty() {
            return Err(ConfigError::EmptyRange("message_word_count"));
        }
        Ok(())
    }
}

/// Process configuration, read from the environment (a `.env` file is honored)
#[derive(Parser)]
#[command(
    name = "oracle-bot",
    version,
    about = "Telegram oracle that answers in scrambled Russian"
)]
pub struct BotConfig {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_URL)]
    pub telegram_api_url: String,

    /// Google Cloud Translation key; the key-less endpoint is used without it
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Seed for the random generator, for reproducible runs
    #[arg(long, env = "ORACLE_SEED")]
    pub seed: Option<u64>,

    /// Use the offline mock translator instead of Google
    #[arg(long, env = "ORACLE_MOCK_TRANSLATOR", action = ArgAction::SetTrue)]
    pub mock_translator: bool,
}
