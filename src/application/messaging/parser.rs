//! Message parser - Turns raw message events into structured messages

use std::collections::HashSet;

use crate::domain::entities::event::id_to_string;
use crate::domain::entities::{Content, Event, Message, Role, User};

/// Parses incoming messages into structured Message objects
pub struct MessageParser {
    command_prefix: String,
    admins: HashSet<String>,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
            admins: HashSet::new(),
        }
    }

    /// Users granted the administrator role
    pub fn with_admins<I, S>(mut self, admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admins = admins.into_iter().map(Into::into).collect();
        self
    }

    pub fn role_of(&self, user_id: &str) -> Role {
        if self.admins.contains(user_id) {
            Role::Admin
        } else {
            Role::Member
        }
    }

    /// Build a `Message` from a `post_type: message` event.
    ///
    /// Returns `None` for any other event or when sender or text is missing.
    pub fn parse_event(&self, event: &Event) -> Option<Message> {
        if !event.is_message() {
            return None;
        }

        let user_id = event.raw.get("user_id").and_then(id_to_string)?;
        let text = event
            .str_field("raw_message")
            .or_else(|| event.str_field("message"))?;

        let mut sender = User::new(user_id.as_str()).with_role(self.role_of(&user_id));
        if let Some(nickname) = event
            .raw
            .get("sender")
            .and_then(|s| s.get("card").and_then(|c| c.as_str()).filter(|c| !c.is_empty())
                .or_else(|| s.get("nickname").and_then(|n| n.as_str())))
        {
            sender = sender.with_nickname(nickname);
        }

        let group_id = match event.str_field("message_type") {
            Some("group") => event.group_id().filter(|id| !id.is_empty()),
            _ => None,
        };
        let chat_id = group_id.clone().unwrap_or_else(|| user_id.clone());

        let message = self.parse(chat_id, text, sender).with_platform(event.platform.clone());
        Some(match group_id {
            Some(group_id) => message.in_group(group_id),
            None => message,
        })
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: User) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        if let Some(cmd_text) = self.strip_prefix(&text) {
            let (name, args) = match cmd_text.split_once(char::is_whitespace) {
                Some((name, args)) => (name, args),
                None => (cmd_text, ""),
            };
            if !name.is_empty() {
                return Message::from_command(chat_id, sender, name, args);
            }
        }

        if text.is_empty() {
            return Message::new(chat_id, sender, Content::Empty);
        }
        Message::from_text(chat_id, sender, text)
    }

    fn strip_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.strip_prefix('/').or_else(|| {
            if self.command_prefix.is_empty() {
                None
            } else {
                text.strip_prefix(self.command_prefix.as_str())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_parts(message: &Message) -> Option<(&str, &str)> {
        match &message.content {
            Content::Command { name, args } => Some((name.as_str(), args.as_str())),
            _ => None,
        }
    }

    #[test]
    fn test_parse_command_keeps_argument_verbatim() {
        let parser = MessageParser::new("/");
        let msg = parser.parse("100", "/设置欢迎 欢迎 新人  ", User::new("1"));
        assert_eq!(command_parts(&msg), Some(("设置欢迎", "欢迎 新人  ")));

        let msg = parser.parse("100", "/设置欢迎\n第一行\n第二行", User::new("1"));
        assert_eq!(command_parts(&msg), Some(("设置欢迎", "第一行\n第二行")));

        let msg = parser.parse("100", "/查看欢迎", User::new("1"));
        assert_eq!(command_parts(&msg), Some(("查看欢迎", "")));
    }

    #[test]
    fn test_parse_custom_prefix() {
        let parser = MessageParser::new("!");
        let msg = parser.parse("100", "!查看欢迎", User::new("1"));
        assert_eq!(command_parts(&msg), Some(("查看欢迎", "")));

        let msg = parser.parse("100", "hello", User::new("1"));
        assert_eq!(msg.content, Content::Text("hello".to_string()));

        let msg = parser.parse("100", "/", User::new("1"));
        assert_eq!(msg.content, Content::Text("/".to_string()));
    }

    #[test]
    fn test_parse_group_event() {
        let parser = MessageParser::new("/").with_admins(["42"]);
        let event = Event::new(json!({
            "post_type": "message",
            "message_type": "group",
            "group_id": 100,
            "user_id": 42,
            "raw_message": "/查看欢迎",
            "sender": {"nickname": "alice", "card": ""},
        }));

        let msg = parser.parse_event(&event).unwrap();
        assert_eq!(msg.group_id.as_deref(), Some("100"));
        assert_eq!(msg.chat_id, "100");
        assert_eq!(msg.sender.role, Role::Admin);
        assert_eq!(msg.sender.display_name(), "alice");
        assert!(msg.content.is_command());
    }

    #[test]
    fn test_parse_private_event() {
        let parser = MessageParser::new("/");
        let event = Event::new(json!({
            "post_type": "message",
            "message_type": "private",
            "user_id": "7",
            "message": "hi",
        }));

        let msg = parser.parse_event(&event).unwrap();
        assert_eq!(msg.group_id, None);
        assert_eq!(msg.chat_id, "7");
        assert_eq!(msg.sender.role, Role::Member);
        assert_eq!(msg.content.text(), Some("hi"));
    }

    #[test]
    fn test_parse_event_rejects_non_messages() {
        let parser = MessageParser::new("/");
        let notice = Event::new(json!({"post_type": "notice", "user_id": 1, "raw_message": "x"}));
        assert!(parser.parse_event(&notice).is_none());

        let no_text = Event::new(json!({"post_type": "message", "user_id": 1}));
        assert!(parser.parse_event(&no_text).is_none());
    }
}
