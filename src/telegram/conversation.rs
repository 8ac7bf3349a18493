//! The polling loop that connects Telegram to the answer pipeline
//!
//! One message at a time: an update is fully answered before the next one
//! is looked at. The cursor is an owned value handed from poll to poll.

use crate::answer::AnswerGenerator;
use crate::mt::MachineTranslator;
use crate::telegram::error::{BotError, BotResult};
use crate::telegram::messenger::Messenger;
use crate::telegram::types::{Cursor, Update};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct ConversationLoop<M: Messenger, T: MachineTranslator, R: Rng> {
    messenger: M,
    oracle: AnswerGenerator<T>,
    rng: R,
    poll_timeout_secs: u64,
    retry_delay: Duration,
}

impl<M: Messenger, T: MachineTranslator, R: Rng> ConversationLoop<M, T, R> {
    const SEND_ATTEMPTS: usize = 3;

    pub fn new(messenger: M, oracle: AnswerGenerator<T>, rng: R) -> Self {
        Self {
            messenger,
            oracle,
            rng,
            poll_timeout_secs: 10,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Pause after a transient failure
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Long-poll timeout passed to the platform
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Cursor at the oldest pending update, so the backlog gets answered
    pub async fn initial_cursor(&self) -> BotResult<Cursor> {
        let pending = self.messenger.fetch_updates(Cursor::start(), 0).await?;
        Ok(pending
            .first()
            .map(|update| Cursor::at(update.update_id))
            .unwrap_or_default())
    }

    /// Fetch one batch after `cursor`, answer it, and return the new cursor
    ///
    /// Only fetch failures are returned; a failed reply is logged and the
    /// cursor still moves past its update.
    pub async fn poll_once(&mut self, cursor: Cursor) -> BotResult<Cursor> {
        let updates = self
            .messenger
            .fetch_updates(cursor, self.poll_timeout_secs)
            .await?;

        let mut cursor = cursor;
        for update in updates {
            cursor = Cursor::after(&update);
            self.handle(update).await;
        }
        Ok(cursor)
    }

    /// Poll forever, starting at `cursor`
    ///
    /// Returns only when the platform rejects the bot before any update was
    /// seen, which means the token itself is bad.
    pub async fn run(&mut self, mut cursor: Cursor) -> BotResult<()> {
        info!(cursor = ?cursor.offset(), "conversation loop started");
        loop {
            cursor = match self.poll_once(cursor).await {
                Ok(next) => next,
                Err(e) => self.recover(cursor, e).await?,
            };
        }
    }

    /// Decide how to continue after a failed poll
    async fn recover(&self, cursor: Cursor, error: BotError) -> BotResult<Cursor> {
        match error {
            BotError::Unauthorized(reason) => {
                if cursor.offset().is_none() {
                    return Err(BotError::Unauthorized(reason));
                }
                warn!(%reason, cursor = ?cursor.offset(), "unauthorized, skipping one update");
                Ok(cursor.skip_one())
            }
            e if e.is_transient() => {
                warn!(error = %e, "poll failed, retrying");
                tokio::time::sleep(self.retry_delay).await;
                Ok(cursor)
            }
            e => {
                error!(error = %e, "poll failed");
                tokio::time::sleep(self.retry_delay).await;
                Ok(cursor)
            }
        }
    }

    async fn handle(&mut self, update: Update) {
        let Some(message) = update.message else {
            debug!(update_id = update.update_id, "update without message skipped");
            return;
        };
        let Some(text) = message.text else {
            debug!(update_id = update.update_id, "message without text skipped");
            return;
        };

        let chat_id = message.chat.id;
        info!(update_id = update.update_id, chat_id, msg = %text, "message received");

        let reply = self.oracle.respond(&text, &mut self.rng).await;
        self.deliver(chat_id, reply.text()).await;
    }

    /// Send a reply, retrying transient failures up to `SEND_ATTEMPTS` times
    async fn deliver(&self, chat_id: i64, text: &str) {
        for attempt in 1..=Self::SEND_ATTEMPTS {
            match self.messenger.send_message(chat_id, text).await {
                Ok(()) => {
                    debug!(chat_id, attempt, reply = text, "reply sent");
                    return;
                }
                Err(BotError::Unauthorized(reason)) => {
                    warn!(chat_id, %reason, "bot was removed or blocked, reply dropped");
                    return;
                }
                Err(e) if e.is_transient() => {
                    warn!(chat_id, attempt, error = %e, "reply not delivered, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    warn!(chat_id, error = %e, "reply rejected");
                    return;
                }
            }
        }
        warn!(
            chat_id,
            attempts = Self::SEND_ATTEMPTS,
            "reply dropped after repeated network failures"
        );
    }
}
