//! The slice of the Bot API object model the oracle reads
//!
//! Unknown fields are ignored, so full Bot API payloads deserialize fine.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    /// Absent for stickers, photos, joins and the like
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<u16>,
    pub description: Option<String>,
}

/// Position in the update stream
///
/// Owned by the conversation loop and passed to every poll; `None` means
/// "whatever Telegram has pending".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(Option<i64>);

impl Cursor {
    pub fn start() -> Self {
        Self(None)
    }

    pub fn at(offset: i64) -> Self {
        Self(Some(offset))
    }

    /// The cursor that acknowledges `update` and everything before it
    pub fn after(update: &Update) -> Self {
        Self(Some(update.update_id + 1))
    }

    /// Move past one more update; a start cursor has nothing to skip
    pub fn skip_one(self) -> Self {
        Self(self.0.map(|offset| offset + 1))
    }

    pub fn offset(&self) -> Option<i64> {
        self.0
    }
}
