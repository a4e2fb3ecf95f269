//! Text command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;

use super::context::{CommandContext, Invocation};

/// Trait for keyword commands
///
/// Each handler processes one or more command names that take a fixed number
/// of words. Handlers are registered with a [`super::CommandRegistry`] and the
/// router dispatches to one only when both the name and the word count match.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl TextCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     fn word_count(&self) -> usize {
///         1
///     }
///
///     async fn handle(&self, _ctx: &CommandContext, _invocation: &Invocation<'_>) -> Result<String> {
///         Ok("pong".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait TextCommandHandler: Send + Sync {
    /// Lower-case command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Number of space-separated words, command name included
    fn word_count(&self) -> usize;

    /// Produce the reply text
    ///
    /// Errors are storage or other unexpected faults; the router turns them
    /// into a generic reply and never shows them to the user.
    async fn handle(&self, ctx: &CommandContext, invocation: &Invocation<'_>) -> Result<String>;
}
