//! Application services - Business logic orchestration

pub mod command_service;
pub mod welcome_store;

pub use command_service::CommandService;
pub use welcome_store::WelcomeStore;
