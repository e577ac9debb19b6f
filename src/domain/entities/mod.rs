//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod event;
pub mod reply;

pub use user::{Role, User};
pub use message::{Message, Content};
pub use command::{Command, CommandRegistry, RegisteredCommand};
pub use event::{Event, JoinNotice};
pub use reply::{Reply, Segment};
