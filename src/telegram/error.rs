/// Error types for the Telegram side of the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Connection trouble, rate limiting or a server-side failure; worth retrying
    Network(String),
    /// The bot was blocked, kicked, or its token revoked
    Unauthorized(String),
    /// Any other error reported by the Bot API
    Api { code: u16, description: String },
    /// The response could not be understood
    Decode(String),
}

impl BotError {
    /// Build an error from a Bot API error code
    pub fn from_api(code: u16, description: String) -> Self {
        match code {
            401 | 403 => BotError::Unauthorized(description),
            429 | 500..=599 => BotError::Network(format!("{} ({})", description, code)),
            _ => BotError::Api { code, description },
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, BotError::Network(_))
    }
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::Network(msg) => write!(f, "Network error: {}", msg),
            BotError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            BotError::Api { code, description } => {
                write!(f, "Bot API error {}: {}", code, description)
            }
            BotError::Decode(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BotError::Decode(err.to_string())
        } else {
            BotError::Network(err.to_string())
        }
    }
}

/// Result type for Telegram operations
pub type BotResult<T> = Result<T, BotError>;
