//! Telegram adapter (teloxide).
//!
//! Implements the `sgb-core` MessagingPort over the Bot API. Polling is
//! driven through explicit `getUpdates` calls so the relay keeps ownership
//! of the update offset.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use teloxide::{
    prelude::*,
    types::{AllowedUpdate, Chat, ParseMode, Update, UpdateKind, User},
    RequestError,
};

use sgb_core::{
    domain::{ChatId, UpdateId, UserId},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{ChatKind, InboundMessage, Sender, TextMode},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn fetch_updates(&self, after: UpdateId, wait: Duration) -> Result<Vec<InboundMessage>> {
        let updates = self
            .bot
            .get_updates()
            .offset((after.0 + 1) as i32)
            .timeout(wait.as_secs() as u32)
            .allowed_updates([AllowedUpdate::Message])
            .await
            .map_err(|e| Error::Transport(format!("getUpdates failed: {e}")))?;

        Ok(updates.into_iter().filter_map(to_inbound).collect())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str, mode: TextMode) -> Result<bool> {
        let mut req = self.bot.send_message(Self::tg_chat(chat_id), text.to_string());
        if mode == TextMode::Html {
            req = req.parse_mode(ParseMode::Html);
        }

        match req.await {
            Ok(_) => Ok(true),
            // The API answered but refused the message (bad chat id, blocked
            // bot, flood limit, unparseable response body).
            Err(RequestError::Api(err)) => {
                debug!(chat = chat_id.0, "sendMessage rejected: {err}");
                Ok(false)
            }
            Err(RequestError::MigrateToChatId(_))
            | Err(RequestError::RetryAfter(_))
            | Err(RequestError::InvalidJson { .. }) => Ok(false),
            Err(e) => Err(Error::Transport(format!("sendMessage failed: {e}"))),
        }
    }
}

/// Map a raw update to the relay's model. Non-message updates are dropped;
/// missing fields degrade to defaults instead of failing the cycle.
fn to_inbound(update: Update) -> Option<InboundMessage> {
    let UpdateKind::Message(msg) = update.kind else {
        return None;
    };

    Some(InboundMessage {
        id: UpdateId(i64::from(update.id)),
        chat_id: ChatId(msg.chat.id.0),
        chat_kind: chat_kind(&msg.chat),
        sender: msg.from().map(to_sender).unwrap_or_else(Sender::unknown),
        text: msg.text().map(|s| s.to_string()),
    })
}

fn chat_kind(chat: &Chat) -> ChatKind {
    if chat.is_private() {
        ChatKind::Private
    } else if chat.is_group() || chat.is_supergroup() {
        ChatKind::Group
    } else {
        ChatKind::Other
    }
}

fn to_sender(user: &User) -> Sender {
    Sender {
        id: UserId(user.id.0 as i64),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_from_json(raw: serde_json::Value) -> Update {
        // teloxide's `Update` uses `#[serde(flatten)]`, which is incompatible
        // with `serde_json::from_value`'s `Content` buffering (the inner
        // `Message` silently fails to deserialize and degrades to
        // `UpdateKind::Error`). Round-trip through a string so the update
        // parses exactly as it does from a live `getUpdates` response body.
        serde_json::from_str(&raw.to_string()).expect("valid update")
    }

    #[test]
    fn maps_private_text_update() {
        let update = update_from_json(serde_json::json!({
            "update_id": 6,
            "message": {
                "message_id": 11,
                "date": 1700000000,
                "chat": {"id": 100, "type": "private", "first_name": "Sara"},
                "from": {"id": 7, "is_bot": false, "first_name": "Sara", "username": "sara7"},
                "text": "Please add dark mode"
            }
        }));

        let msg = to_inbound(update).expect("message update");
        assert_eq!(msg.id, UpdateId(6));
        assert_eq!(msg.chat_id, ChatId(100));
        assert_eq!(msg.chat_kind, ChatKind::Private);
        assert_eq!(msg.sender.id, UserId(7));
        assert_eq!(msg.sender.username.as_deref(), Some("sara7"));
        assert_eq!(msg.text.as_deref(), Some("Please add dark mode"));
    }

    #[test]
    fn maps_group_chats_as_group() {
        let update = update_from_json(serde_json::json!({
            "update_id": 7,
            "message": {
                "message_id": 12,
                "date": 1700000000,
                "chat": {"id": -5, "type": "group", "title": "devs"},
                "from": {"id": 7, "is_bot": false, "first_name": "Sara"},
                "text": "group chatter"
            }
        }));

        let msg = to_inbound(update).expect("message update");
        assert_eq!(msg.chat_kind, ChatKind::Group);
    }

    #[test]
    fn missing_author_degrades_to_unknown_sender() {
        let update = update_from_json(serde_json::json!({
            "update_id": 8,
            "message": {
                "message_id": 13,
                "date": 1700000000,
                "chat": {"id": 100, "type": "private", "first_name": "Sara"},
                "text": "anonymous"
            }
        }));

        let msg = to_inbound(update).expect("message update");
        assert_eq!(msg.sender, Sender::unknown());
    }

    #[test]
    fn non_message_updates_are_dropped() {
        let update = update_from_json(serde_json::json!({
            "update_id": 9,
            "edited_message": {
                "message_id": 14,
                "date": 1700000000,
                "chat": {"id": 100, "type": "private", "first_name": "Sara"},
                "text": "edited"
            }
        }));

        assert!(to_inbound(update).is_none());
    }
}
