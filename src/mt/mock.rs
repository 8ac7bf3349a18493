//! Mock Machine Translator for testing
//!
//! A deterministic, network-free translator used by the test suite and by
//! the binary's mock mode. It counts every call, which lets tests assert
//! how many round-trips the answer pipeline made.
//!
//! # Example
//!
//! ```ignore
//! use oracle_bot::mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "ru").await.unwrap();
//!     assert_eq!(result, "hello_ru");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_ru"
    Suffix,

    /// Return the input unchanged
    NoOp,

    /// Fail every call with a `TranslationError`
    Error(String),

    /// Answer every call with the same text
    Fixed(String),

    /// Answer by target locale: `{"en": "...", "ru": "..."}`.
    /// Unknown targets fall back to suffix mode.
    ByTarget(HashMap<String, String>),

    /// Answer from a queue of canned results, one per call.
    /// Once the queue is drained every call fails.
    Scripted,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    script: Mutex<VecDeque<MtResult<String>>>,
    calls: AtomicUsize,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            delay_ms: 0,
        }
    }

    /// Create a MockTranslator with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Create a MockTranslator that replays `results` in order
    ///
    /// ```ignore
    /// let mock = MockTranslator::scripted(vec![
    ///     Ok("what is the meaning of life".to_string()),
    ///     Err(MtError::NetworkError("reset".to_string())),
    ///     Ok("Смысл жизни".to_string()),
    /// ]);
    /// ```
    pub fn scripted(results: Vec<MtResult<String>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            ..Self::new(MockMode::Scripted)
        }
    }

    /// Number of `translate` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, text: &str, _source: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::NoOp => Ok(text.to_string()),
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::Fixed(reply) => Ok(reply.clone()),
            MockMode::ByTarget(map) => Ok(map
                .get(target)
                .cloned()
                .unwrap_or_else(|| format!("{}_{}", text, target))),
            MockMode::Scripted => {
                let mut script = self
                    .script
                    .lock()
                    .map_err(|_| MtError::Other("Mock script lock poisoned".to_string()))?;
                script.pop_front().unwrap_or_else(|| {
                    Err(MtError::TranslationError(
                        "Mock script exhausted".to_string(),
                    ))
                })
            }
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.apply_translation(text, source_locale, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
