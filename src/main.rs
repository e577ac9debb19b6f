use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

use group_welcome::application::messaging::{MessageDispatcher, MessageParser};
use group_welcome::domain::traits::Bot;
use group_welcome::infrastructure::adapters::ConsoleAdapter;
use group_welcome::infrastructure::config::{Config, ConsoleConfig};
use group_welcome::plugins::welcome::{WelcomePlugin, PLUGIN_NAME};
use group_welcome::plugins::PluginManager;

#[derive(Parser)]
#[command(name = "group-welcome")]
#[command(about = "Greets new group members with a per-group welcome message", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Data directory (overrides config)
    #[arg(short, long)]
    data_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(&cli.config, cli.data_dir),
        Commands::Version => {
            println!("group-welcome v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(&cli.config),
    }
}

fn load_config(config_path: &str) -> Config {
    if !Path::new(config_path).exists() {
        return Config::load_env();
    }

    match Config::load(config_path) {
        Ok(config) => config.with_env(),
        Err(e) => {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        }
    }
}

fn run_bot(config_path: &str, data_dir: Option<String>) -> ExitCode {
    let mut config = load_config(config_path);
    if let Some(dir) = data_dir {
        config.storage.data_dir = dir.into();
    }

    let console = match &config.adapters.console {
        Some(console) if console.enabled => console.clone(),
        _ => {
            tracing::error!("No adapter enabled, nothing to run");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting {}", config.bot.name);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(run_console_bot(config, console))
}

async fn run_console_bot(config: Config, console: ConsoleConfig) -> ExitCode {
    let mut plugins = PluginManager::new(config.bot.prefix.clone());
    let welcome = WelcomePlugin::with_data_dir(
        config.welcome.default_message.clone(),
        config.plugin_data_dir(PLUGIN_NAME),
    );
    if let Err(e) = plugins.register(welcome) {
        tracing::error!("Failed to register plugin: {}", e);
        return ExitCode::FAILURE;
    }

    plugins.initialize_all().await;
    for info in plugins.list_plugins() {
        tracing::info!("Loaded plugin {}: {}", info.name, info.description);
    }
    tracing::info!(
        "Plugin system initialized with {} plugins, {} commands",
        plugins.len(),
        plugins.commands().len()
    );

    let parser = MessageParser::new(config.bot.prefix.clone()).with_admins(config.admins.clone());
    let dispatcher = MessageDispatcher::new(parser, plugins);

    let bot = ConsoleAdapter::new(&console);
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start bot: {}", e);
        return ExitCode::FAILURE;
    }
    let info = bot.bot_info();
    tracing::info!("Bot started: {} ({})", info.name, info.id);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        let event = match bot.parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Dropping unreadable event: {}", e);
                continue;
            }
        };

        for reply in dispatcher.dispatch(&event).await {
            if let Err(e) = bot.send_reply(&reply).await {
                tracing::error!("Failed to send message: {}", e);
            }
        }
    }

    dispatcher.plugins().terminate_all().await;
    tracing::info!("Stopped");
    ExitCode::SUCCESS
}

fn init_config(config_path: &str) -> ExitCode {
    if Path::new(config_path).exists() {
        tracing::error!("{} already exists, not overwriting", config_path);
        return ExitCode::FAILURE;
    }

    let yaml = match Config::default().to_yaml() {
        Ok(yaml) => yaml,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match std::fs::write(config_path, yaml) {
        Ok(()) => {
            println!("Wrote default config to {}", config_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to write {}: {}", config_path, e);
            ExitCode::FAILURE
        }
    }
}
