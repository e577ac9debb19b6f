//! Plugin trait definitions

use async_trait::async_trait;

use crate::application::errors::PluginResult;
use crate::domain::entities::{Command, Event, Message, Reply, User};

/// Core plugin trait that all plugins must implement
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique identifier for the plugin
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Commands this plugin answers
    fn commands(&self) -> Vec<Command> {
        Vec::new()
    }

    /// Called once before any event is delivered
    async fn initialize(&self) -> PluginResult<()> {
        Ok(())
    }

    /// Called once when the host shuts down
    async fn terminate(&self) -> PluginResult<()> {
        Ok(())
    }

    /// Inspect an inbound event. Events the plugin does not care about yield `None`.
    async fn on_event(&self, _event: &Event) -> Option<Reply> {
        None
    }

    /// Answer one of the commands listed by [`Plugin::commands`]
    async fn on_command(&self, _ctx: &CommandContext) -> Option<Reply> {
        None
    }
}

/// Everything a plugin gets to see about a command invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub message: Message,
    /// Canonical command name, aliases already resolved
    pub command: String,
    pub args: String,
}

impl CommandContext {
    pub fn new(message: Message, command: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            message,
            command: command.into(),
            args: args.into(),
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        self.message.group_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn sender(&self) -> &User {
        &self.message.sender
    }

    /// Plain-text reply into the chat the command came from
    pub fn reply(&self, text: impl Into<String>) -> Reply {
        Reply::plain(self.message.chat_id.clone(), text)
    }
}
