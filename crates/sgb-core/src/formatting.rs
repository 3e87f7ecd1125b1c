//! Fixed bot texts and the admin notification builder.

use crate::messaging::types::Sender;

/// Welcome reply to `/start` (HTML).
pub const WELCOME: &str = "\u{1F44B} <b>Welcome!</b>\n\n\
Send me any feature you would like to see added.\n\n\
Your suggestion goes straight to the admins \u{1F4E9}";

/// Acknowledgment after a suggestion reached the admins (plain).
pub const THANKS: &str =
    "\u{2705} Your suggestion has been sent to the admins, thank you!";

/// Apology when the suggestion could not be delivered (plain).
pub const SEND_FAILED: &str =
    "\u{274C} Sorry, something went wrong while sending your suggestion. Please try again.";

const SEPARATOR: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build the HTML notification relayed to the admin chat.
///
/// Every user-controlled field goes through `escape_html`; the suggestion and
/// the sender's names must never reach Telegram as interpretable markup.
pub fn admin_notification(suggestion: &str, sender: &Sender) -> String {
    let id = sender.id.0;

    let mut user_block = format!("Name: {}\n", escape_html(&sender.display_name()));
    if let Some(username) = &sender.username {
        user_block.push_str(&format!("Username: @{}\n", escape_html(username)));
    }
    user_block.push_str(&format!(
        "ID: <code>{id}</code>\nLink: <a href=\"tg://user?id={id}\">profile</a>"
    ));

    format!(
        "\u{1F4E9} <b>New suggestion</b>\n{SEPARATOR}\n\n\
         \u{1F4AD} <b>Suggestion:</b>\n{}\n\n\
         \u{1F464} <b>From:</b>\n{user_block}\n{SEPARATOR}",
        escape_html(suggestion),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn sender(username: Option<&str>) -> Sender {
        Sender {
            id: UserId(7),
            first_name: "Sara".to_string(),
            last_name: None,
            username: username.map(|s| s.to_string()),
        }
    }

    #[test]
    fn escapes_html() {
        let s = r#"<a href="x&y">"#;
        assert_eq!(escape_html(s), "&lt;a href=&quot;x&amp;y&quot;&gt;");
    }

    #[test]
    fn notification_escapes_markup_in_suggestion() {
        let note = admin_notification("use <b>bold</b> here", &sender(None));
        assert!(note.contains("use &lt;b&gt;bold&lt;/b&gt; here"));
        assert!(!note.contains("<b>bold</b>"));
    }

    #[test]
    fn notification_carries_sender_identity() {
        let note = admin_notification("Please add dark mode", &sender(Some("sara7")));
        assert!(note.contains("Please add dark mode"));
        assert!(note.contains("@sara7"));
        assert!(note.contains("<code>7</code>"));
        assert!(note.contains(r#"<a href="tg://user?id=7">"#));
    }

    #[test]
    fn notification_omits_username_line_when_absent() {
        let note = admin_notification("hello", &sender(None));
        assert!(!note.contains("Username:"));
        assert!(note.contains("Name: Sara"));
    }

    #[test]
    fn notification_escapes_hostile_names() {
        let mut s = sender(Some("x<i>y"));
        s.first_name = "<script>".to_string();
        let note = admin_notification("hi", &s);
        assert!(note.contains("&lt;script&gt;"));
        assert!(note.contains("@x&lt;i&gt;y"));
    }
}
