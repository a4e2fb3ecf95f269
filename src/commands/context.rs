//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::features::reminders::ReminderStore;
use crate::transport::ChatAddress;

/// Services shared by every command handler
#[derive(Clone)]
pub struct CommandContext {
    pub store: Arc<dyn ReminderStore>,
    /// Shown by `about` when configured
    pub homepage: Option<String>,
}

impl CommandContext {
    pub fn new(store: Arc<dyn ReminderStore>, homepage: Option<String>) -> Self {
        Self { store, homepage }
    }
}

/// One inbound chat message, already split into words
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub request_id: Uuid,
    pub sender: &'a ChatAddress,
    /// Trimmed message body
    pub text: &'a str,
    pub words: Vec<&'a str>,
    pub received_at: DateTime<Utc>,
}

impl<'a> Invocation<'a> {
    pub fn new(
        request_id: Uuid,
        sender: &'a ChatAddress,
        text: &'a str,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            sender,
            text,
            words: text.split(' ').collect(),
            received_at,
        }
    }

    /// Account the sender acts as for ownership checks
    pub fn account_id(&self) -> &str {
        self.sender.account_id()
    }

    /// Word after the command name, if any
    pub fn argument(&self) -> Option<&'a str> {
        self.words.get(1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }

    #[test]
    fn test_words_split_on_single_spaces() {
        let sender = ChatAddress::parse("a/1").unwrap();
        let invocation = Invocation::new(Uuid::new_v4(), &sender, "remove  5", Utc::now());
        assert_eq!(invocation.words, vec!["remove", "", "5"]);
        assert_eq!(invocation.argument(), Some(""));
        assert_eq!(invocation.account_id(), "a");
    }
}
