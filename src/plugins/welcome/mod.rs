//! Group welcome plugin
//!
//! Greets members who join a group with that group's welcome text, and lets
//! admins set or view the text with `设置欢迎` / `查看欢迎`.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::application::errors::{PluginError, PluginResult, ValidationError};
use crate::application::services::WelcomeStore;
use crate::domain::entities::{Command, Event, Reply, Segment};
use crate::domain::traits::WelcomeBacking;
use crate::infrastructure::storage::JsonFileBacking;
use crate::plugins::trait_def::{CommandContext, Plugin};

pub const PLUGIN_NAME: &str = "welcome";
pub const SET_COMMAND: &str = "设置欢迎";
pub const VIEW_COMMAND: &str = "查看欢迎";
pub const DEFAULT_MESSAGE: &str = "欢迎新人~";

pub struct WelcomePlugin {
    store: RwLock<WelcomeStore>,
}

impl WelcomePlugin {
    pub fn new(store: WelcomeStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Store welcome texts as JSON under `data_dir`
    pub fn with_data_dir(default_text: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let backing: Arc<dyn WelcomeBacking> = Arc::new(JsonFileBacking::new(data_dir));
        Self::new(WelcomeStore::new(default_text, backing))
    }

    /// Welcome text currently in effect for `group_id`
    pub async fn welcome_for(&self, group_id: &str) -> String {
        self.store.read().await.get_welcome(group_id).to_string()
    }

    fn greet(group_id: &str, user_id: u64, welcome: &str) -> Reply {
        Reply::chain(group_id, vec![
            Segment::Mention { user_id },
            Segment::Text(format!(" {}", welcome)),
        ])
    }

    /// Both commands are admin-only and make no sense outside a group
    fn check_access<'a>(ctx: &'a CommandContext) -> Result<&'a str, ValidationError> {
        let group_id = ctx.group_id().ok_or(ValidationError::NotInGroup)?;
        if !ctx.sender().role.is_admin() {
            return Err(ValidationError::InsufficientPermission);
        }
        Ok(group_id)
    }

    async fn set_welcome(&self, ctx: &CommandContext) -> Reply {
        let group_id = match Self::check_access(ctx) {
            Ok(group_id) => group_id,
            Err(e) => return ctx.reply(e.to_string()),
        };

        let mut store = self.store.write().await;
        match store.set_welcome(group_id, &ctx.args).await {
            Ok(()) => {
                info!("Group {} set a new welcome message", group_id);
                ctx.reply(format!("已设置本群欢迎语:\n{}", ctx.args))
            }
            Err(e) => ctx.reply(e.to_string()),
        }
    }

    async fn view_welcome(&self, ctx: &CommandContext) -> Reply {
        let group_id = match Self::check_access(ctx) {
            Ok(group_id) => group_id,
            Err(e) => return ctx.reply(e.to_string()),
        };

        let current = self.welcome_for(group_id).await;
        ctx.reply(format!("当前欢迎语:\n{}", current))
    }
}

#[async_trait]
impl Plugin for WelcomePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn description(&self) -> &str {
        "新人入群自动发送欢迎消息，支持为不同群设置不同的欢迎语"
    }

    fn commands(&self) -> Vec<Command> {
        vec![
            Command::new(SET_COMMAND)
                .with_description("设置本群欢迎语")
                .with_usage(format!("/{} 欢迎内容", SET_COMMAND))
                .admin_only(),
            Command::new(VIEW_COMMAND)
                .with_description("查看本群当前欢迎语")
                .with_usage(format!("/{}", VIEW_COMMAND))
                .admin_only(),
        ]
    }

    async fn initialize(&self) -> PluginResult<()> {
        let mut store = self.store.write().await;
        store.init().await.map_err(|e| PluginError::Init {
            name: PLUGIN_NAME.to_string(),
            reason: e.to_string(),
        })?;

        match store.load().await {
            Ok(count) => info!(
                "Loaded welcome config for {} groups, default message: {}",
                count,
                store.default_text()
            ),
            Err(e) => error!("Failed to load welcome config, starting empty: {}", e),
        }
        Ok(())
    }

    async fn terminate(&self) -> PluginResult<()> {
        let store = self.store.read().await;
        match store.save().await {
            Ok(()) => info!("Welcome plugin terminated, config saved"),
            Err(e) => error!("Failed to save welcome config on shutdown: {}", e),
        }
        Ok(())
    }

    async fn on_event(&self, event: &Event) -> Option<Reply> {
        let notice = event.join_notice()?;
        let welcome = self.welcome_for(&notice.group_id).await;

        info!("New member {} joined group {}, sending welcome", notice.user_id, notice.group_id);
        Some(Self::greet(&notice.group_id, notice.user_id, &welcome))
    }

    async fn on_command(&self, ctx: &CommandContext) -> Option<Reply> {
        match ctx.command.as_str() {
            SET_COMMAND => Some(self.set_welcome(ctx).await),
            VIEW_COMMAND => Some(self.view_welcome(ctx).await),
            other => {
                warn!("Welcome plugin got unknown command: {}", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::domain::entities::{Message, Role, User};
    use crate::infrastructure::storage::MemoryBacking;

    fn plugin(default_text: &str) -> (WelcomePlugin, MemoryBacking) {
        let backing = MemoryBacking::new();
        let store = WelcomeStore::new(default_text, Arc::new(backing.clone()));
        (WelcomePlugin::new(store), backing)
    }

    fn join(group_id: &str, user_id: u64) -> Event {
        Event::new(json!({
            "post_type": "notice",
            "notice_type": "group_increase",
            "group_id": group_id,
            "user_id": user_id,
        }))
    }

    fn command(group: Option<&str>, role: Role, name: &str, args: &str) -> CommandContext {
        let sender = User::new("7").with_role(role);
        let mut message = Message::from_command(group.unwrap_or("7"), sender, name, args);
        message.group_id = group.map(str::to_string);
        CommandContext::new(message, name, args)
    }

    #[tokio::test]
    async fn test_join_uses_default() {
        let (plugin, _) = plugin("Welcome!");
        let reply = plugin.on_event(&join("100", 12345)).await.unwrap();
        assert_eq!(reply.chat_id, "100");
        assert_eq!(reply.segments, vec![
            Segment::Mention { user_id: 12345 },
            Segment::Text(" Welcome!".to_string()),
        ]);
    }

    #[tokio::test]
    async fn test_join_uses_group_text() {
        let (plugin, _) = plugin("Welcome!");
        let reply = plugin.on_command(&command(Some("100"), Role::Admin, SET_COMMAND, "Hi there")).await.unwrap();
        assert_eq!(reply.text(), "已设置本群欢迎语:\nHi there");

        let reply = plugin.on_event(&join("100", 12345)).await.unwrap();
        assert_eq!(reply.to_string(), "@12345 Hi there");

        let other = plugin.on_event(&join("200", 1)).await.unwrap();
        assert_eq!(other.to_string(), "@1 Welcome!");
    }

    #[tokio::test]
    async fn test_other_events_ignored() {
        let (plugin, _) = plugin("Welcome!");
        assert!(plugin.on_event(&Event::new(json!({"post_type": "message"}))).await.is_none());
        assert!(plugin.on_event(&join("100", 0)).await.is_none());
        assert!(plugin.on_event(&join("", 5)).await.is_none());
    }

    #[tokio::test]
    async fn test_view_requires_admin() {
        let (plugin, backing) = plugin("Welcome!");
        let reply = plugin.on_command(&command(Some("100"), Role::Member, VIEW_COMMAND, "")).await.unwrap();
        assert_eq!(reply.text(), "抱歉，你的权限不足");
        assert!(backing.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_set_requires_group() {
        let (plugin, backing) = plugin("Welcome!");
        let reply = plugin.on_command(&command(None, Role::Admin, SET_COMMAND, "Hi")).await.unwrap();
        assert_eq!(reply.text(), "此命令仅在群聊中可用");
        assert_eq!(reply.chat_id, "7");
        assert!(backing.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_group_check_comes_before_role_check() {
        let (plugin, _) = plugin("Welcome!");
        let reply = plugin.on_command(&command(None, Role::Member, VIEW_COMMAND, "")).await.unwrap();
        assert_eq!(reply.text(), "此命令仅在群聊中可用");
    }

    #[tokio::test]
    async fn test_set_blank_rejected() {
        let (plugin, backing) = plugin("Welcome!");
        let reply = plugin.on_command(&command(Some("100"), Role::Admin, SET_COMMAND, "   ")).await.unwrap();
        assert_eq!(reply.text(), "欢迎语不能为空");
        assert!(backing.snapshot().await.is_none());
        assert_eq!(plugin.welcome_for("100").await, "Welcome!");
    }

    #[tokio::test]
    async fn test_view_falls_back_to_default() {
        let (plugin, _) = plugin("Welcome!");
        let reply = plugin.on_command(&command(Some("100"), Role::Admin, VIEW_COMMAND, "")).await.unwrap();
        assert_eq!(reply.text(), "当前欢迎语:\nWelcome!");
    }

    #[tokio::test]
    async fn test_initialize_and_terminate_with_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("plugin_data").join(PLUGIN_NAME);

        let plugin = WelcomePlugin::with_data_dir(DEFAULT_MESSAGE, &data_dir);
        assert!(!data_dir.exists());
        plugin.initialize().await.unwrap();
        assert!(data_dir.is_dir());
        plugin.on_command(&command(Some("100"), Role::Admin, SET_COMMAND, "你好")).await;
        plugin.terminate().await.unwrap();

        let restarted = WelcomePlugin::with_data_dir(DEFAULT_MESSAGE, &data_dir);
        restarted.initialize().await.unwrap();
        assert_eq!(restarted.welcome_for("100").await, "你好");
        assert_eq!(restarted.welcome_for("200").await, DEFAULT_MESSAGE);
    }

    #[tokio::test]
    async fn test_initialize_fails_when_data_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join(PLUGIN_NAME);
        std::fs::write(&data_dir, "").unwrap();

        let plugin = WelcomePlugin::with_data_dir(DEFAULT_MESSAGE, &data_dir);
        let err = plugin.initialize().await.unwrap_err();
        assert!(matches!(err, PluginError::Init { ref name, .. } if name == PLUGIN_NAME));
    }
}
