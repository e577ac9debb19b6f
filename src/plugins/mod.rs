//! Plugin system
//! 
//! Plugins receive every inbound event and answer the commands they declare.

pub mod manager;
pub mod trait_def;
pub mod welcome;

pub use manager::{PluginInfo, PluginManager};
pub use trait_def::{CommandContext, Plugin};
pub use welcome::WelcomePlugin;
