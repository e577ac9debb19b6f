//! Message dispatcher - Routes inbound events to plugins

use crate::application::errors::{BotError, CommandError};
use crate::application::services::command_service::HELP_COMMAND;
use crate::domain::entities::{Content, Event, Reply};
use crate::plugins::{CommandContext, PluginManager};
use super::parser::MessageParser;

/// Routes every inbound event through the plugin manager
pub struct MessageDispatcher {
    parser: MessageParser,
    plugins: PluginManager,
}

impl MessageDispatcher {
    pub fn new(parser: MessageParser, plugins: PluginManager) -> Self {
        Self { parser, plugins }
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    /// Process one event, returning the replies to send in order.
    ///
    /// Command messages go to the owning plugin; every event, commands
    /// included, is also offered to all plugins as a plain event.
    pub async fn dispatch(&self, event: &Event) -> Vec<Reply> {
        let mut replies = Vec::new();

        if let Some(message) = self.parser.parse_event(event) {
            tracing::debug!("[{}] {:?}", message.chat_id, message.content);

            if let Content::Command { name, args } = &message.content {
                let ctx = CommandContext::new(message.clone(), name.clone(), args.clone());
                match self.run_command(ctx).await {
                    Ok(Some(reply)) => replies.push(reply),
                    Ok(None) => {}
                    Err(BotError::Command(CommandError::NotFound(name))) => {
                        tracing::debug!("Ignoring unknown command: {}", name);
                    }
                    Err(e) => tracing::error!("[{}] Command failed: {}", message.chat_id, e),
                }
            }
        }

        replies.extend(self.plugins.handle_event(event).await);
        replies
    }

    async fn run_command(&self, ctx: CommandContext) -> Result<Option<Reply>, BotError> {
        if ctx.command.eq_ignore_ascii_case(HELP_COMMAND) {
            let topic = ctx.args.split_whitespace().next();
            let help = self.plugins.commands().get_help(topic);
            return Ok(Some(ctx.reply(help)));
        }

        Ok(self.plugins.handle_command(ctx).await?)
    }
}
