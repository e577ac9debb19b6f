//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::plugins::welcome::DEFAULT_MESSAGE;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub welcome: WelcomeConfig,
    /// User ids holding the administrator role
    pub admins: Vec<String>,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Each plugin keeps its files in `<data-dir>/<plugin name>`
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WelcomeConfig {
    pub default_message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

/// Identity used for plain-text lines typed into the console
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub user_id: String,
    pub group_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "group-welcome".to_string(),
                prefix: "/".to_string(),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("./data/plugin_data"),
            },
            welcome: WelcomeConfig {
                default_message: DEFAULT_MESSAGE.to_string(),
            },
            admins: Vec::new(),
            adapters: AdaptersConfig {
                console: Some(ConsoleConfig {
                    enabled: true,
                    user_id: "console".to_string(),
                    group_id: Some("console".to_string()),
                }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.welcome.default_message.trim().is_empty() {
            return Err(ConfigError::InvalidValue("welcome.default-message must not be empty".to_string()));
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!("bot.prefix must not contain whitespace: {:?}", self.bot.prefix)));
        }
        Ok(())
    }

    /// Directory a plugin stores its files in
    pub fn plugin_data_dir(&self, plugin: &str) -> PathBuf {
        self.storage.data_dir.join(plugin)
    }

    /// Apply environment overrides on top of `self`
    pub fn with_env(mut self) -> Self {
        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(dir) = std::env::var("BOT_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Ok(message) = std::env::var("WELCOME_DEFAULT_MESSAGE") {
            if !message.trim().is_empty() {
                self.welcome.default_message = message;
            }
        }

        if let Ok(admins) = std::env::var("BOT_ADMINS") {
            self.admins = admins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        self
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }
}
