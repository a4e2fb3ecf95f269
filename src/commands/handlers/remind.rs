//! Reminder command handlers
//!
//! Handles: list, remove [id]
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};

use crate::commands::context::{CommandContext, Invocation};
use crate::commands::handler::TextCommandHandler;
use crate::features::reminders::{format_due, Reminder, ReminderStatus, RemoveOutcome};

pub const NO_REMINDERS: &str = "You do not have any Reminders currently in the system.";
pub const REMOVED: &str = "The Reminder has been deleted successfully.";
pub const NOT_OWNED_OR_MISSING: &str =
    "Sorry! This does not seem to be a valid Reminder record in my system or you do not own that Reminder.";
pub const INVALID_REMINDER_ID: &str =
    "Could not remove the Reminder. Please check the format for the Reminder Id and/or try again.";

/// One listing line: `ID=<id> Reminder Msg = <message> on <due>`
pub fn format_listing_line(reminder: &Reminder) -> String {
    format!(
        "ID={} Reminder Msg = {} on {}",
        reminder.id,
        reminder.message,
        format_due(&reminder.due_at)
    )
}

/// Handler for `list`: the caller's active reminders
pub struct ListHandler;

#[async_trait]
impl TextCommandHandler for ListHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["list"]
    }

    fn word_count(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &CommandContext, invocation: &Invocation<'_>) -> Result<String> {
        let reminders = ctx
            .store
            .list_by_account_and_status(invocation.account_id(), ReminderStatus::Active)
            .await?;

        debug!(
            "[{}] Listing {} active reminder(s) for {}",
            invocation.request_id,
            reminders.len(),
            invocation.account_id()
        );

        if reminders.is_empty() {
            return Ok(NO_REMINDERS.to_string());
        }

        Ok(reminders
            .iter()
            .map(format_listing_line)
            .collect::<Vec<_>>()
            .join("\r\n"))
    }
}

/// Handler for `remove <id>`: owner-scoped delete
pub struct RemoveHandler;

#[async_trait]
impl TextCommandHandler for RemoveHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remove"]
    }

    fn word_count(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &CommandContext, invocation: &Invocation<'_>) -> Result<String> {
        let raw_id = invocation.argument().unwrap_or_default();
        let account = invocation.account_id();

        let reply = match ctx.store.remove_owned(raw_id, account).await? {
            RemoveOutcome::Deleted => {
                info!("[{}] Deleted reminder {raw_id} for {account}", invocation.request_id);
                REMOVED
            }
            RemoveOutcome::NotFound => {
                debug!(
                    "[{}] Reminder {raw_id} not found for {account}",
                    invocation.request_id
                );
                NOT_OWNED_OR_MISSING
            }
            RemoveOutcome::InvalidId => {
                debug!("[{}] Malformed reminder id '{raw_id}'", invocation.request_id);
                INVALID_REMINDER_ID
            }
        };
        Ok(reply.to_string())
    }
}
