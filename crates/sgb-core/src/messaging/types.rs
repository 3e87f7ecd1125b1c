use crate::domain::{ChatId, UpdateId, UserId};

/// What kind of chat a message arrived from. Only `Private` is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Other,
}

/// Parse mode of an outgoing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextMode {
    Plain,
    Html,
}

/// The message author, taken verbatim from the incoming update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Sender {
    /// Stand-in for updates that arrive without author information.
    pub fn unknown() -> Self {
        Self {
            id: UserId(0),
            first_name: "unknown".to_string(),
            last_name: None,
            username: None,
        }
    }

    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Cross-messenger incoming message model.
///
/// Telegram-specific fields live in the Telegram adapter; non-text content
/// shows up here with `text: None` and is ignored by the relay.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub id: UpdateId,
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    pub sender: Sender,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_last_name() {
        let s = Sender {
            id: UserId(7),
            first_name: "Sara".to_string(),
            last_name: Some("Khaled".to_string()),
            username: None,
        };
        assert_eq!(s.display_name(), "Sara Khaled");
    }

    #[test]
    fn display_name_without_last_name() {
        let s = Sender {
            id: UserId(7),
            first_name: "Sara".to_string(),
            last_name: None,
            username: None,
        };
        assert_eq!(s.display_name(), "Sara");
    }
}
