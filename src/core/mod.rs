//! # Core Module
//!
//! Configuration and reply formatting shared by the bot binary and features.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::{Config, StoreBackend, DEFAULT_SWEEP_INTERVAL_SECS};
pub use response::{chunk_for_message, chunk_text, MESSAGE_LIMIT};
