//! Reminder syntax: `<digits><d|h|m> <message>`
//!
//! The offset token is everything before the first space and must match the
//! whole pattern (case-insensitive). The message is the rest of the input
//! starting at that space, left untrimmed.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

static OFFSET_TOKEN: OnceLock<Regex> = OnceLock::new();

fn offset_token_pattern() -> &'static Regex {
    OFFSET_TOKEN.get_or_init(|| {
        Regex::new(r"^([0-9]*)([dhm])$").expect("offset token pattern is a valid regex")
    })
}

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Why a reminder command was rejected. The display text is sent back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("You must give a command.")]
    MissingCommand,

    /// Grammar matched but the quantity is not a usable number
    #[error("Invalid Value")]
    InvalidValue,

    #[error("Invalid Reminder format. Reminder format is as follows : A positive number followed by d or h or m (where d = days, h = hours and m = minutes) and then followed by space and a reminder message. For example 10d Dentist Appointment")]
    InvalidFormat,
}

/// A successfully parsed reminder command, normalised to minutes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub offset_minutes: i64,
    pub message: String,
}

impl ReminderRequest {
    /// Trigger time for a request made at `now`
    pub fn due_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ParseError> {
        Duration::try_minutes(self.offset_minutes)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or(ParseError::InvalidValue)
    }
}

/// Parse raw command text into a [`ReminderRequest`]
pub fn parse(raw: &str) -> Result<ReminderRequest, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::MissingCommand);
    }
    let space = raw.find(' ').ok_or(ParseError::MissingCommand)?;

    let token = raw[..space].trim().to_lowercase();
    let captures = offset_token_pattern()
        .captures(&token)
        .ok_or(ParseError::InvalidFormat)?;

    // An empty digit group is a value error, not a format error
    let quantity: u32 = captures[1].parse().map_err(|_| ParseError::InvalidValue)?;
    let multiplier = match &captures[2] {
        "d" => MINUTES_PER_DAY,
        "h" => MINUTES_PER_HOUR,
        _ => 1,
    };

    Ok(ReminderRequest {
        offset_minutes: i64::from(quantity) * multiplier,
        message: raw[space..].to_string(),
    })
}
