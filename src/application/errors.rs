//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Plugin lifecycle errors
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Plugin '{0}' already registered")]
    AlreadyRegistered(String),

    #[error("Plugin '{name}' failed to initialize: {reason}")]
    Init { name: String, reason: String },
}

/// Rejected input. The `Display` text is what the user gets to see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("此命令仅在群聊中可用")]
    NotInGroup,

    #[error("抱歉，你的权限不足")]
    InsufficientPermission,

    #[error("欢迎语不能为空")]
    EmptyWelcome,
}

pub type PluginResult<T> = Result<T, PluginError>;
