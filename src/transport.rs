//! # Chat transport
//!
//! Channel addressing and outbound delivery.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! A chat address is `account[/resource]`. On Discord the account is the user
//! id and the resource is the channel a command arrived in; an address with
//! no resource is delivered by direct message.

use async_trait::async_trait;
use log::{info, warn};
use serenity::http::Http;
use serenity::model::id::{ChannelId, UserId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::chunk_for_message;

/// Separator between the account and the resource part of an address
pub const RESOURCE_DELIMITER: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("chat address has no account part: '{0}'")]
    MissingAccount(String),

    #[error("chat address has an empty resource part: '{0}'")]
    EmptyResource(String),
}

/// A parsed chat address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatAddress {
    account: String,
    resource: Option<String>,
}

impl ChatAddress {
    pub fn new(account: impl Into<String>, resource: Option<String>) -> Self {
        ChatAddress {
            account: account.into(),
            resource,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let (account, resource) = match raw.split_once(RESOURCE_DELIMITER) {
            Some((account, resource)) => {
                if resource.is_empty() {
                    return Err(AddressError::EmptyResource(raw.to_string()));
                }
                (account, Some(resource.to_string()))
            }
            None => (raw, None),
        };
        if account.trim().is_empty() {
            return Err(AddressError::MissingAccount(raw.to_string()));
        }
        Ok(ChatAddress::new(account, resource))
    }

    /// Normalised account identifier used for ownership checks
    pub fn account_id(&self) -> &str {
        &self.account
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl fmt::Display for ChatAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource {
            Some(resource) => write!(f, "{}{RESOURCE_DELIMITER}{resource}", self.account),
            None => f.write_str(&self.account),
        }
    }
}

/// A send attempt reached the transport but did not succeed
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("recipient '{0}' cannot be reached on this transport")]
    Unroutable(String),

    #[error("transport rejected the message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, recipient: &ChatAddress, body: &str) -> Result<(), DeliveryError>;
}

/// Send and log the outcome; the caller never changes course on the result
pub async fn send_and_log(transport: &dyn ChatTransport, recipient: &ChatAddress, body: &str) -> bool {
    match transport.send(recipient, body).await {
        Ok(()) => {
            info!("Message has been sent successfully to {recipient}");
            true
        }
        Err(e) => {
            warn!("Message could not be sent to {recipient}: {e}");
            false
        }
    }
}

/// Remove `<@id>` / `<@!id>` mentions of the bot from a guild message
pub fn strip_bot_mention(content: &str, bot_id: u64) -> String {
    content
        .replace(&format!("<@{bot_id}>"), "")
        .replace(&format!("<@!{bot_id}>"), "")
        .trim()
        .to_string()
}

/// Discord delivery over the serenity HTTP client
#[derive(Clone)]
pub struct SerenityTransport {
    http: Arc<Http>,
}

impl SerenityTransport {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn parse_snowflake(address: &ChatAddress, part: &str) -> Result<u64, DeliveryError> {
        part.parse::<u64>()
            .map_err(|_| DeliveryError::Unroutable(address.to_string()))
    }
}

#[async_trait]
impl ChatTransport for SerenityTransport {
    async fn send(&self, recipient: &ChatAddress, body: &str) -> Result<(), DeliveryError> {
        let http: &Http = &self.http;
        let channel_id = match recipient.resource() {
            Some(channel) => ChannelId(Self::parse_snowflake(recipient, channel)?),
            None => {
                let user_id = UserId(Self::parse_snowflake(recipient, recipient.account_id())?);
                user_id
                    .create_dm_channel(http)
                    .await
                    .map_err(|e| DeliveryError::Rejected(e.to_string()))?
                    .id
            }
        };

        for chunk in chunk_for_message(body) {
            channel_id
                .say(http, chunk)
                .await
                .map_err(|e| DeliveryError::Rejected(e.to_string()))?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;

    #[test]
    fn test_parse_with_resource() {
        let address = ChatAddress::parse("alice@example.com/Talk.v104").unwrap();
        assert_eq!(address.account_id(), "alice@example.com");
        assert_eq!(address.resource(), Some("Talk.v104"));
        assert_eq!(address.to_string(), "alice@example.com/Talk.v104");
    }

    #[test]
    fn test_account_stops_at_first_delimiter() {
        let address = ChatAddress::parse("123/456/789").unwrap();
        assert_eq!(address.account_id(), "123");
        assert_eq!(address.resource(), Some("456/789"));
    }

    #[test]
    fn test_parse_bare_account() {
        let address = ChatAddress::parse("123").unwrap();
        assert_eq!(address.account_id(), "123");
        assert_eq!(address.resource(), None);
        assert_eq!(address.to_string(), "123");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ChatAddress::parse(""), Err(AddressError::MissingAccount(_))));
        assert!(matches!(ChatAddress::parse("/456"), Err(AddressError::MissingAccount(_))));
        assert!(matches!(ChatAddress::parse("123/"), Err(AddressError::EmptyResource(_))));
    }

    #[test]
    fn test_strip_bot_mention() {
        assert_eq!(strip_bot_mention("<@42> list", 42), "list");
        assert_eq!(strip_bot_mention("<@!42>   10m Stretch", 42), "10m Stretch");
        assert_eq!(strip_bot_mention("hey <@7> <@42> help", 42), "hey <@7>  help");
    }

    #[tokio::test]
    async fn test_send_and_log_reports_outcome() {
        let transport = RecordingTransport::failing_for(&["down"]);
        let up = ChatAddress::parse("up/1").unwrap();
        let down = ChatAddress::parse("down/1").unwrap();

        assert!(send_and_log(&transport, &up, "hi").await);
        assert!(!send_and_log(&transport, &down, "hi").await);
        assert_eq!(transport.sent().await.len(), 2);
    }
}
