use crate::domain::entities::{Command, CommandRegistry, RegisteredCommand};
use crate::application::errors::CommandError;

/// Name of the built-in help command
pub const HELP_COMMAND: &str = "help";

/// Service for looking up commands and describing them
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command, owner: &str) {
        if let Some(previous) = self.registry.register(command, owner) {
            tracing::warn!("Command from plugin '{}' replaced by plugin '{}'", previous, owner);
        }
    }

    pub fn resolve(&self, name: &str) -> Result<&RegisteredCommand, CommandError> {
        self.registry
            .find(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(entry) = self.registry.find(name) {
                let cmd = &entry.command;
                let mut help = format!("{}{} - {}", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("No description"));
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                if cmd.admin_only {
                    help.push_str("\n(admin only)");
                }
                return help;
            }
            return format!("Command {}{} not found", self.prefix, name);
        }

        let mut names: Vec<&Command> = self.registry.all().map(|e| &e.command).collect();
        names.sort_by(|a, b| a.name.cmp(&b.name));

        let mut help = "Available commands:\n".to_string();
        help.push_str(&format!("  {}{} - Show this message\n", self.prefix, HELP_COMMAND));
        for cmd in names {
            help.push_str(&format!("  {}{} - {}\n", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("")));
        }
        help
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
