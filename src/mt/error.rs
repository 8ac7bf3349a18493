/// Error types for the Machine Translation module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Provider is misconfigured (missing key, rejected credentials)
    ConfigError(String),
    /// Transport-level failure talking to the provider
    NetworkError(String),
    /// The provider did not answer in time
    Timeout(String),
    /// Locale code is malformed
    InvalidLocale(String),
    /// Provider answered, but not with a usable translation
    TranslationError(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            MtError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            MtError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MtError::Timeout(err.to_string())
        } else if err.is_decode() {
            MtError::TranslationError(format!("Failed to decode response: {}", err))
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
