/// Machine Translation Module
///
/// The oracle's only window to real language. Everything the answer pipeline
/// knows about translation goes through the [`MachineTranslator`] trait:
///
/// 1. **MT Trait** - text in, text out, failures as [`MtError`]
/// 2. **Google Provider** - Cloud API v2 with a key, public web endpoint without
/// 3. **Mock Provider** - deterministic translator for tests and offline runs
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use translator::{AUTO_DETECT, MachineTranslator, normalize_locale, validate_locale};
