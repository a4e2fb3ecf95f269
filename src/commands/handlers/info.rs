//! Info command handlers
//!
//! Handles: help, about
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::commands::context::{CommandContext, Invocation};
use crate::commands::handler::TextCommandHandler;

pub const BOT_NAME: &str = "MyReminderBot";

const HELP_LINES: &[&str] = &[
    "***** Welcome to MyReminderBot *****",
    "I understand the following commands:",
    "1. Type help to get the list of commands.",
    "2. To create a reminder, type a text that follows this format [When] [ReminderText], where [When] is a positive number followed by either d or h or m. d = Days, h = Hours and m = Minutes. [ReminderText] is the message that you want to receive when the reminder goes off. Examples: 10m Send email on Project Status. This will set a reminder 10 minutes from now and when the reminder is triggered, you will receive a message \"Send email on Project Status\" from the bot",
    "3. Type list to get your currently active list of reminders which are set for some time in the future.",
    "4. Type remove [ID] to delete any active reminder, where [ID] is the reminder ID. You can get your current active list of reminders by typing list.",
    "5. Type about to get more information about this Agent.",
];

/// Usage text listing every command
pub fn help_text() -> String {
    HELP_LINES.join("\r\n")
}

/// Identity and version line, plus the homepage when one is configured
pub fn about_text(homepage: Option<&str>) -> String {
    let mut text = format!(
        "Hello! I am the {BOT_NAME} version {}",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(url) = homepage {
        text.push_str(&format!("\r\n({url})"));
    }
    text
}

pub struct HelpHandler;

#[async_trait]
impl TextCommandHandler for HelpHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["help"]
    }

    fn word_count(&self) -> usize {
        1
    }

    async fn handle(&self, _ctx: &CommandContext, invocation: &Invocation<'_>) -> Result<String> {
        debug!("[{}] Sending help text", invocation.request_id);
        Ok(help_text())
    }
}

pub struct AboutHandler;

#[async_trait]
impl TextCommandHandler for AboutHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["about"]
    }

    fn word_count(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &CommandContext, _invocation: &Invocation<'_>) -> Result<String> {
        Ok(about_text(ctx.homepage.as_deref()))
    }
}
