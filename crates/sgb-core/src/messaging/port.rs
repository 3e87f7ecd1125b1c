use std::time::Duration;

use async_trait::async_trait;

use crate::{
    domain::{ChatId, UpdateId},
    messaging::types::{InboundMessage, TextMode},
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the first implementation; the relay only ever needs the two
/// calls below, so future adapters stay small.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Long-poll for messages with id strictly greater than `after`.
    ///
    /// Blocks server-side up to `wait`, returns an empty batch on timeout and
    /// `Error::Transport` on any network/HTTP failure.
    async fn fetch_updates(&self, after: UpdateId, wait: Duration) -> Result<Vec<InboundMessage>>;

    /// Single best-effort send.
    ///
    /// `Ok(false)` means the API answered but refused the message; only
    /// transport-level failures (connection refused, timeout) surface as
    /// `Error::Transport`.
    async fn send_text(&self, chat_id: ChatId, text: &str, mode: TextMode) -> Result<bool>;
}
