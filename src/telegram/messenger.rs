//! Messaging platform abstraction
//!
//! The conversation loop only needs two things from a chat platform: the
//! next batch of updates after a cursor, and a way to post a reply.

use crate::telegram::error::BotResult;
use crate::telegram::types::{Cursor, Update};
use async_trait::async_trait;

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Updates after `cursor`, waiting up to `timeout_secs` for new ones
    ///
    /// A timeout of zero returns immediately with whatever is pending.
    async fn fetch_updates(&self, cursor: Cursor, timeout_secs: u64) -> BotResult<Vec<Update>>;

    /// Post `text` to the chat `chat_id`
    async fn send_message(&self, chat_id: i64, text: &str) -> BotResult<()>;
}
