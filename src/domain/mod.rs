//! Domain layer - Core business objects with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (User, Message, Event, Reply, Command)
//! - Traits: Abstractions for infrastructure (Bot, WelcomeBacking)

pub mod entities;
pub mod traits;
