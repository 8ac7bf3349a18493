/// Answer generation
///
/// The oracle's reply is built from a few real words of the question and a
/// handful of synthetic Cyrillic words, shuffled together and pushed through
/// a translation service. The result is kept only if it looks Russian and
/// is not a near copy of what was sent.
///
/// 1. **Script Classifier** - does a character belong to the target alphabet
/// 2. **Text Generator** - random pseudo-words in that alphabet
/// 3. **Word Selector** - the longest words of the (translated) question
/// 4. **Overlap Validator** - script check plus diagonal shared-run check
/// 5. **Orchestrator** - bounded retry loop tying it all together
pub mod generator;
pub mod orchestrator;
pub mod overlap;
pub mod script;
pub mod selector;

pub use generator::TextGenerator;
pub use orchestrator::{AnswerGenerator, Reply};
pub use overlap::{OverlapValidator, ValidationVerdict, longest_substring_finder};
pub use script::ScriptClassifier;
pub use selector::{choose_words, tokenize};
