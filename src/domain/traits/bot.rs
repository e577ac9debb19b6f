use async_trait::async_trait;
use crate::domain::entities::Reply;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Start the bot and begin listening for events
    async fn start(&self) -> Result<(), BotError>;

    /// Deliver a reply to its chat, returning the platform message id
    async fn send_reply(&self, reply: &Reply) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
