// Core layer - configuration and reply formatting
pub mod core;

// Features layer - reminder parsing, storage boundary and sweep
pub mod features;

// Infrastructure
pub mod database;
pub mod transport;

// Application layer
pub mod command_handler;
pub mod commands;

pub use crate::core::Config;

pub use features::{MemoryStore, ReminderScheduler, ReminderStore};

pub use command_handler::CommandHandler;
pub use database::Database;
pub use transport::{ChatAddress, ChatTransport, SerenityTransport};
