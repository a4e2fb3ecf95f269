//! # Command Router
//!
//! Turns one inbound chat message into exactly one reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Keyword commands (help, about, list, remove) go through the
//! [`CommandRegistry`]; any other message of two or more words is a reminder
//! to add. Faults never escape: they are logged and replaced by a generic reply.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::{CommandContext, Invocation};
use crate::commands::handlers::create_all_handlers;
use crate::commands::registry::CommandRegistry;
use crate::features::reminders::{parse, NewReminder, ReminderStore};
use crate::transport::ChatAddress;

pub const EMPTY_COMMAND: &str = "You must give a command.";
pub const ADDED: &str = "Added the Reminder successfully.";
pub const NOT_UNDERSTOOD: &str = "Sorry! Could not understand your command.";
pub const GENERIC_FAILURE: &str = "MyReminderBot could not understand your command. Please try again.";

#[derive(Clone)]
pub struct CommandHandler {
    context: CommandContext,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(store: Arc<dyn ReminderStore>, homepage: Option<String>) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        Self {
            context: CommandContext::new(store, homepage),
            registry,
        }
    }

    /// Reply to `body` sent from `sender` (a raw chat address)
    pub async fn handle_message(&self, sender: &str, body: &str) -> String {
        self.handle_message_at(sender, body, Utc::now()).await
    }

    /// Same as [`Self::handle_message`] with an explicit receive time
    pub async fn handle_message_at(&self, sender: &str, body: &str, now: DateTime<Utc>) -> String {
        let request_id = Uuid::new_v4();
        info!("[{request_id}] 📥 Message received | From: {sender} | Body: '{body}'");

        match self.route(request_id, sender, body, now).await {
            Ok(reply) => {
                debug!("[{request_id}] 📤 Reply ready ({} chars)", reply.len());
                reply
            }
            Err(e) => {
                error!("[{request_id}] ❌ Failed to handle command: {e:#}");
                GENERIC_FAILURE.to_string()
            }
        }
    }

    async fn route(
        &self,
        request_id: Uuid,
        sender: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let text = body.trim();
        if text.is_empty() {
            return Ok(EMPTY_COMMAND.to_string());
        }

        let sender = ChatAddress::parse(sender)?;
        let invocation = Invocation::new(request_id, &sender, text, now);

        if let Some(handler) = self.registry.resolve(&invocation.words) {
            debug!(
                "[{request_id}] Dispatching keyword command '{}'",
                invocation.words[0]
            );
            return handler.handle(&self.context, &invocation).await;
        }

        if invocation.words.len() >= 2 {
            return self.add_reminder(&invocation).await;
        }

        debug!("[{request_id}] Unrecognised single-word command '{text}'");
        Ok(NOT_UNDERSTOOD.to_string())
    }

    async fn add_reminder(&self, invocation: &Invocation<'_>) -> Result<String> {
        let request_id = invocation.request_id;
        let now = invocation.received_at;

        let (request, due_at) = match parse(invocation.text)
            .and_then(|request| request.due_from(now).map(|due_at| (request, due_at)))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("[{request_id}] Rejected reminder syntax: {e}");
                return Ok(e.to_string());
            }
        };

        let id = self
            .context
            .store
            .create(NewReminder {
                owner_chat_id: invocation.sender.to_string(),
                owner_account_id: invocation.account_id().to_string(),
                message: request.message,
                created_at: now,
                due_at,
            })
            .await?;

        info!(
            "[{request_id}] ⏰ Created reminder {id} for {} in {} minute(s)",
            invocation.account_id(),
            request.offset_minutes
        );
        Ok(ADDED.to_string())
    }
}
