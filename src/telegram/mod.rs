/// Telegram front end
///
/// Long-polls the Bot API, feeds each text message to the answer pipeline
/// and posts the reply back.
pub mod client;
pub mod conversation;
pub mod error;
pub mod messenger;
pub mod types;

pub use client::{DEFAULT_API_URL, TelegramClient};
pub use conversation::ConversationLoop;
pub use error::{BotError, BotResult};
pub use messenger::Messenger;
pub use types::{Chat, Cursor, Message, Update};
