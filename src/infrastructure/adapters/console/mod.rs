//! Console adapter for development/testing
//!
//! Each stdin line is either a raw JSON event or plain text, which is wrapped
//! into a message event from the configured console user.

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use crate::domain::entities::{Event, Reply};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;
use crate::infrastructure::config::ConsoleConfig;

pub const PLATFORM: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    user_id: String,
    group_id: Option<String>,
    sender: Option<mpsc::Sender<String>>,
}

impl ConsoleAdapter {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "group-welcome".to_string(),
            },
            user_id: config.user_id.clone(),
            group_id: config.group_id.clone().filter(|g| !g.is_empty()),
            sender: None,
        }
    }

    /// Route output into a channel instead of stdout
    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Turn one input line into an event. Blank lines yield `None`.
    pub fn parse_line(&self, line: &str) -> Result<Option<Event>, BotError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let raw: serde_json::Value = if line.trim_start().starts_with('{') {
            serde_json::from_str(line).map_err(|e| BotError::Parse(e.to_string()))?
        } else {
            match &self.group_id {
                Some(group_id) => json!({
                    "post_type": "message",
                    "message_type": "group",
                    "group_id": group_id,
                    "user_id": self.user_id,
                    "raw_message": line,
                }),
                None => json!({
                    "post_type": "message",
                    "message_type": "private",
                    "user_id": self.user_id,
                    "raw_message": line,
                }),
            }
        };

        Ok(Some(Event::new(raw).with_platform(PLATFORM)))
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_reply(&self, reply: &Reply) -> Result<String, BotError> {
        let rendered = format!("[BOT -> {}] {}", reply.chat_id, reply);
        match &self.sender {
            Some(sender) => sender
                .send(rendered)
                .await
                .map_err(|e| BotError::Internal(e.to_string()))?,
            None => println!("{}", rendered),
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Segment;

    fn adapter(group_id: Option<&str>) -> ConsoleAdapter {
        ConsoleAdapter::new(&ConsoleConfig {
            enabled: true,
            user_id: "42".to_string(),
            group_id: group_id.map(str::to_string),
        })
    }

    #[test]
    fn test_plain_line_becomes_group_message() {
        let event = adapter(Some("100")).parse_line("/查看欢迎\n").unwrap().unwrap();
        assert!(event.is_message());
        assert_eq!(event.group_id().as_deref(), Some("100"));
        assert_eq!(event.str_field("raw_message"), Some("/查看欢迎"));
        assert_eq!(event.platform, PLATFORM);
    }

    #[test]
    fn test_plain_line_without_group_is_private() {
        let event = adapter(None).parse_line("hello").unwrap().unwrap();
        assert_eq!(event.str_field("message_type"), Some("private"));
        assert!(event.group_id().is_none());
    }

    #[test]
    fn test_json_line_passes_through() {
        let line = r#"{"post_type":"notice","notice_type":"group_increase","group_id":100,"user_id":5}"#;
        let event = adapter(None).parse_line(line).unwrap().unwrap();
        assert!(event.join_notice().is_some());

        assert!(adapter(None).parse_line("{broken").is_err());
        assert!(adapter(None).parse_line("   ").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_send_reply_renders_mention() {
        let (tx, mut rx) = mpsc::channel(4);
        let bot = adapter(None).with_sender(tx);
        let reply = Reply::chain("100", vec![
            Segment::Mention { user_id: 5 },
            Segment::Text(" hi".to_string()),
        ]);
        bot.send_reply(&reply).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), "[BOT -> 100] @5 hi");
        assert_eq!(bot.bot_info().id, "console");
    }
}
