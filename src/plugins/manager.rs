//! Plugin manager - handles plugin lifecycle and event fan-out

use std::sync::Arc;
use tracing::{error, info};

use crate::application::errors::{CommandError, PluginError};
use crate::application::services::CommandService;
use crate::domain::entities::{Event, Reply};
use crate::plugins::trait_def::{CommandContext, Plugin};

/// Manages all plugins for the bot
pub struct PluginManager {
    /// Registration order is delivery order
    plugins: Vec<Arc<dyn Plugin>>,
    commands: CommandService,
}

impl PluginManager {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            plugins: Vec::new(),
            commands: CommandService::new(prefix),
        }
    }

    /// Register a plugin and the commands it declares
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), PluginError> {
        self.register_shared(Arc::new(plugin))
    }

    pub fn register_shared(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        let name = plugin.name().to_string();

        if self.has_plugin(&name) {
            return Err(PluginError::AlreadyRegistered(name));
        }

        for command in plugin.commands() {
            self.commands.register(command, &name);
        }

        info!("Registering plugin: {}", name);
        self.plugins.push(plugin);
        Ok(())
    }

    /// Initialize every plugin. One failing plugin does not stop the others.
    pub async fn initialize_all(&self) -> Vec<PluginError> {
        let mut failures = Vec::new();
        for plugin in &self.plugins {
            if let Err(e) = plugin.initialize().await {
                error!("Plugin '{}' failed to initialize: {}", plugin.name(), e);
                failures.push(e);
            }
        }
        failures
    }

    pub async fn terminate_all(&self) {
        for plugin in self.plugins.iter().rev() {
            if let Err(e) = plugin.terminate().await {
                error!("Plugin '{}' failed to terminate: {}", plugin.name(), e);
            }
        }
    }

    /// Offer an event to every plugin, collecting the replies
    pub async fn handle_event(&self, event: &Event) -> Vec<Reply> {
        let mut replies = Vec::new();
        for plugin in &self.plugins {
            if let Some(reply) = plugin.on_event(event).await {
                replies.push(reply);
            }
        }
        replies
    }

    /// Route a command to the plugin that declared it
    pub async fn handle_command(&self, mut ctx: CommandContext) -> Result<Option<Reply>, CommandError> {
        let entry = self.commands.resolve(&ctx.command)?;
        let plugin = self
            .plugins
            .iter()
            .find(|p| p.name() == entry.owner)
            .ok_or_else(|| CommandError::ExecutionFailed(format!("Plugin '{}' not loaded", entry.owner)))?;

        ctx.command = entry.command.name.clone();
        Ok(plugin.on_command(&ctx).await)
    }

    /// List all registered plugins
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(|plugin| {
            PluginInfo {
                name: plugin.name().to_string(),
                description: plugin.description().to_string(),
            }
        }).collect()
    }

    /// Check if a plugin exists
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn commands(&self) -> &CommandService {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Plugin information for listing
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
}
