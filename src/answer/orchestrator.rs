//! Turns an incoming message into the oracle's reply
//!
//! ```text
//! TRANSLATING_INPUT ──fail──────────────────────────────► EXHAUSTED
//!        │
//!        ▼
//! ATTEMPTING(0..N) ──select + generate + shuffle──► translate ──► validate
//!        ▲                                              │            │
//!        └──────────── failed / rejected ◄──────────────┘            ▼
//!                                                                ACCEPTED
//! ```
//!
//! The generator keeps no state between messages; randomness is passed in
//! by the caller so a seeded generator makes the pipeline reproducible.

use crate::answer::generator::TextGenerator;
use crate::answer::overlap::{OverlapValidator, ValidationVerdict};
use crate::answer::script::ScriptClassifier;
use crate::answer::selector::choose_words;
use crate::config::{AnswerConfig, ConfigError, START_COMMAND};
use crate::mt::{AUTO_DETECT, MachineTranslator, MtError, MtResult};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

/// What the oracle says back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Answer to `/start`
    Greeting(String),
    /// A translated candidate passed validation on attempt `attempt` (1-based)
    Accepted { text: String, attempt: usize },
    /// Every attempt failed, or the input could not be translated
    Exhausted(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Greeting(text) | Reply::Accepted { text, .. } | Reply::Exhausted(text) => text,
        }
    }
}

/// The answer pipeline over a translation provider
pub struct AnswerGenerator<T: MachineTranslator> {
    translator: T,
    config: AnswerConfig,
    generator: TextGenerator,
    validator: OverlapValidator,
}

impl<T: MachineTranslator> AnswerGenerator<T> {
    pub fn new(translator: T, config: AnswerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = TextGenerator::from_config(&config);
        let validator = OverlapValidator::new(
            ScriptClassifier::new(&config.symbols),
            config.overlap_threshold,
        );
        Ok(Self {
            translator,
            config,
            generator,
            validator,
        })
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Reply to a raw message: the greeting for `/start`, an answer otherwise
    pub async fn respond<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Reply {
        if message == START_COMMAND {
            return Reply::Greeting(self.config.greeting.clone());
        }
        self.generate_answer(message, rng).await
    }

    /// Run the translate, scramble and validate loop for one message
    ///
    /// Never fails: translation errors either move on to the next attempt
    /// or, for the initial translation, end in the fallback sentence.
    pub async fn generate_answer<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Reply {
        let intermediate = match self
            .translate(message, AUTO_DETECT, &self.config.intermediate_locale)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "input translation failed, falling back");
                return self.exhausted();
            }
        };
        debug!(original = message, intermediate = %intermediate, "input translated");

        for attempt in 1..=self.config.translate_attempts {
            let candidate = self.compose_candidate(&intermediate, rng);

            let translated = match self
                .translate(
                    &candidate,
                    &self.config.candidate_source_locale,
                    &self.config.reply_locale,
                )
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    warn!(attempt, error = %e, "candidate translation failed");
                    continue;
                }
            };
            debug!(attempt, shuffled = %candidate, translated = %translated, "candidate translated");

            match self.validator.verdict(&candidate, &translated) {
                ValidationVerdict::Valid => {
                    info!(attempt, reply = %translated, "answer accepted");
                    return Reply::Accepted {
                        text: translated,
                        attempt,
                    };
                }
                verdict => debug!(attempt, ?verdict, "candidate rejected"),
            }
        }

        info!(
            attempts = self.config.translate_attempts,
            "no candidate accepted, falling back"
        );
        self.exhausted()
    }

    /// Longest real words plus synthetic words, shuffled and space-joined
    fn compose_candidate<R: Rng + ?Sized>(&self, intermediate: &str, rng: &mut R) -> String {
        let mut words: Vec<String> =
            choose_words(intermediate, self.config.message_word_count.clone(), rng)
                .into_iter()
                .map(str::to_string)
                .collect();
        words.extend(self.generator.generate_words(rng));
        words.shuffle(rng);
        words.join(" ")
    }

    /// One provider call, bounded by the configured timeout
    async fn translate(&self, text: &str, source: &str, target: &str) -> MtResult<String> {
        let timeout = self.config.translation_timeout;
        let call = self.translator.translate(text, source, target);
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(MtError::Timeout(format!(
                "{} did not answer within {:?}",
                self.translator.provider_name(),
                timeout
            ))),
        }
    }

    fn exhausted(&self) -> Reply {
        Reply::Exhausted(self.config.fallback.clone())
    }
}
