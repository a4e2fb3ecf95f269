//! # Command System
//!
//! Plain-text chat commands: keyword handlers plus the reminder syntax.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

// Re-export the router
pub use crate::command_handler::CommandHandler;

// Re-export handler infrastructure
pub use context::{CommandContext, Invocation};
pub use handler::TextCommandHandler;
pub use registry::CommandRegistry;
