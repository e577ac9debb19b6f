//! group-welcome - greets new group members with a per-group welcome message

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod plugins;
