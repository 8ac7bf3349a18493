//! An oracle for Telegram
//!
//! Ask it anything; it answers with a sentence that looks perfectly Russian
//! and means nothing in particular. The answer is built from the longest
//! words of the question (translated to English), padded with random
//! Cyrillic pseudo-words, shuffled, and run through a translation service
//! until the result starts in Cyrillic and is no longer a copy of what went
//! in. When nothing works out, the oracle falls back to "Истину знает только
//! Бог." ("Only God knows the truth.").
//!
//! ```ignore
//! use oracle_bot::{AnswerConfig, AnswerGenerator, GoogleTranslateProvider};
//! use rand::SeedableRng;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let oracle = AnswerGenerator::new(GoogleTranslateProvider::from_env()?, AnswerConfig::default())?;
//!     let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!     println!("{}", oracle.respond("Will I be happy?", &mut rng).await.text());
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod config;
pub mod mt;
pub mod telegram;

#[cfg(test)]
mod integration_tests;

pub use answer::{AnswerGenerator, Reply};
pub use config::{AnswerConfig, BotConfig, ConfigError};
pub use mt::{GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator, MtError};
pub use telegram::{BotError, ConversationLoop, Cursor, Messenger, TelegramClient};
