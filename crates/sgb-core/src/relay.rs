//! The update-polling-and-dispatch loop.
//!
//! One sequential loop: fetch a batch of updates past the high-water-mark,
//! classify each message, relay suggestions to the admin chat, advance the
//! mark. No failure while handling one message may stop the loop or leak
//! into the next message.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    domain::UpdateId,
    formatting,
    messaging::{
        port::MessagingPort,
        types::{ChatKind, InboundMessage, TextMode},
    },
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MessageKind {
    Start,
    Suggestion,
    Ignored,
}

/// `/start` (with or without arguments) opens a session; any other slash
/// command, empty text and non-text content are silently ignored.
fn classify(text: Option<&str>) -> MessageKind {
    match text {
        Some(t) if t.starts_with("/start") => MessageKind::Start,
        Some(t) if !t.is_empty() && !t.starts_with('/') => MessageKind::Suggestion,
        _ => MessageKind::Ignored,
    }
}

pub struct Relay {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
    last_update_id: UpdateId,
}

impl Relay {
    pub fn new(cfg: Arc<Config>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            cfg,
            messenger,
            last_update_id: UpdateId(0),
        }
    }

    /// Largest update id already selected for processing.
    pub fn last_update_id(&self) -> UpdateId {
        self.last_update_id
    }

    /// Poll forever. Transport failures are logged and retried after a fixed
    /// backoff; there is no escalation beyond that.
    pub async fn run(&mut self) {
        info!("relay loop started");
        loop {
            if let Err(e) = self.cycle().await {
                error!("update fetch failed: {e}");
                sleep(self.cfg.error_backoff).await;
            }
        }
    }

    /// One poll cycle: a single long-poll fetch plus sequential handling of
    /// every returned message. The server-side wait paces empty cycles.
    pub async fn cycle(&mut self) -> Result<()> {
        let batch = self
            .messenger
            .fetch_updates(self.last_update_id, self.cfg.poll_timeout)
            .await?;

        for msg in batch {
            // Advance before handling: a crash mid-handling must not replay
            // the same update forever.
            self.last_update_id = msg.id;
            self.handle(msg).await;
        }

        Ok(())
    }

    async fn handle(&self, msg: InboundMessage) {
        if msg.chat_kind != ChatKind::Private {
            debug!(chat = msg.chat_id.0, "ignoring non-private chat");
            return;
        }

        match classify(msg.text.as_deref()) {
            MessageKind::Start => self.handle_start(&msg).await,
            MessageKind::Suggestion => self.handle_suggestion(&msg).await,
            MessageKind::Ignored => {
                debug!(chat = msg.chat_id.0, "ignoring update");
            }
        }
    }

    async fn handle_start(&self, msg: &InboundMessage) {
        match self
            .messenger
            .send_text(msg.chat_id, formatting::WELCOME, TextMode::Html)
            .await
        {
            Ok(true) => {}
            Ok(false) => warn!(chat = msg.chat_id.0, "welcome message refused"),
            Err(e) => warn!(chat = msg.chat_id.0, "welcome message failed: {e}"),
        }

        let sender = &msg.sender;
        info!(
            name = %sender.display_name(),
            username = sender.username.as_deref().unwrap_or("-"),
            id = sender.id.0,
            "new user started the bot"
        );
    }

    async fn handle_suggestion(&self, msg: &InboundMessage) {
        let text = msg.text.as_deref().unwrap_or_default();
        let sender = &msg.sender;
        let note = formatting::admin_notification(text, sender);

        let delivered = match self
            .messenger
            .send_text(self.cfg.admin_chat_id, &note, TextMode::Html)
            .await
        {
            Ok(true) => true,
            Ok(false) => {
                error!(id = sender.id.0, "admin chat refused the suggestion");
                false
            }
            Err(e) => {
                error!(id = sender.id.0, "failed to relay suggestion: {e}");
                false
            }
        };

        if delivered {
            if let Err(e) = self
                .messenger
                .send_text(msg.chat_id, formatting::THANKS, TextMode::Plain)
                .await
            {
                warn!(chat = msg.chat_id.0, "thank-you message failed: {e}");
            }
            info!(
                name = %sender.display_name(),
                username = sender.username.as_deref().unwrap_or("-"),
                id = sender.id.0,
                "suggestion relayed to admins"
            );
        } else {
            // Best-effort apology; a failure here has nowhere left to go.
            let _ = self
                .messenger
                .send_text(msg.chat_id, formatting::SEND_FAILED, TextMode::Plain)
                .await;
        }
    }
}
