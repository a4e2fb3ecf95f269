//! # Reminders Feature
//!
//! Reminder syntax parsing, persistence boundary and the due-reminder sweep.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod parser;
pub mod scheduler;
pub mod store;

pub use model::{format_due, NewReminder, Reminder, ReminderStatus, UnknownStatus};
pub use parser::{parse, ParseError, ReminderRequest};
pub use scheduler::{ReminderScheduler, SweepReport};
pub use store::{DeleteOutcome, MemoryStore, ReminderStore, RemoveOutcome, StoreError};
