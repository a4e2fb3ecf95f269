//! Reminder records and their lifecycle status

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle of a reminder. `Active` flips to `Sent` once, after delivery was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderStatus {
    Active,
    Sent,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Active => "ACTIVE",
            ReminderStatus::Sent => "SENT",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown reminder status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ReminderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ReminderStatus::Active),
            "SENT" => Ok(ReminderStatus::Sent),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A persisted reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: i64,
    /// Full channel address of the requester, used for delivery
    pub owner_chat_id: String,
    /// Account part of `owner_chat_id`, used for ownership checks
    pub owner_account_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub status: ReminderStatus,
}

/// A reminder that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub owner_chat_id: String,
    pub owner_account_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
}

impl NewReminder {
    /// Attach the store-assigned id; new reminders always start out active
    pub fn into_reminder(self, id: i64) -> Reminder {
        Reminder {
            id,
            owner_chat_id: self.owner_chat_id,
            owner_account_id: self.owner_account_id,
            message: self.message,
            created_at: self.created_at,
            due_at: self.due_at,
            status: ReminderStatus::Active,
        }
    }
}

/// Render a timestamp the way reminder listings show it, e.g. `Mon Oct 19 18:09:00 UTC 2026`
pub fn format_due(at: &DateTime<Utc>) -> String {
    at.format("%a %b %d %H:%M:%S UTC %Y").to_string()
}
