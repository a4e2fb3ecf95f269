//! Reminder persistence boundary
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! `ReminderStore` is implemented by the SQLite [`crate::database::Database`]
//! and by the in-process [`MemoryStore`].

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use super::model::{NewReminder, Reminder, ReminderStatus};

/// The storage collaborator failed; never shown to chat users
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] sqlite::Error),

    #[error("corrupt reminder row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

    #[error("reminder {0} does not exist")]
    Missing(i64),
}

/// Result of an owner-scoped delete. Absent and not-owned are the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Result of a `remove <id>` request where the id is still raw user text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Deleted,
    NotFound,
    InvalidId,
}

impl From<DeleteOutcome> for RemoveOutcome {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted => RemoveOutcome::Deleted,
            DeleteOutcome::NotFound => RemoveOutcome::NotFound,
        }
    }
}

/// Key-indexed reminder collection
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Persist a new reminder with status `ACTIVE` and return its fresh id
    async fn create(&self, reminder: NewReminder) -> Result<i64, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Reminder>, StoreError>;

    async fn list_by_account_and_status(
        &self,
        account_id: &str,
        status: ReminderStatus,
    ) -> Result<Vec<Reminder>, StoreError>;

    async fn list_by_status(&self, status: ReminderStatus) -> Result<Vec<Reminder>, StoreError>;

    /// Overwrite the status of one reminder (last writer wins)
    async fn update_status(&self, id: i64, status: ReminderStatus) -> Result<(), StoreError>;

    /// Delete `id` only if it belongs to `account_id`
    async fn delete_by_id_and_account(
        &self,
        id: i64,
        account_id: &str,
    ) -> Result<DeleteOutcome, StoreError>;

    /// Delete by a user-supplied id; a non-numeric id is reported, not raised
    async fn remove_owned(&self, raw_id: &str, account_id: &str) -> Result<RemoveOutcome, StoreError> {
        match raw_id.trim().parse::<i64>() {
            Ok(id) => Ok(self.delete_by_id_and_account(id, account_id).await?.into()),
            Err(_) => Ok(RemoveOutcome::InvalidId),
        }
    }
}

/// In-process store for ephemeral deployments and tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    reminders: Arc<DashMap<i64, Reminder>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    fn collect_where<F>(&self, keep: F) -> Vec<Reminder>
    where
        F: Fn(&Reminder) -> bool,
    {
        self.reminders
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn create(&self, reminder: NewReminder) -> Result<i64, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.reminders.insert(id, reminder.into_reminder(id));
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Reminder>, StoreError> {
        Ok(self.reminders.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_account_and_status(
        &self,
        account_id: &str,
        status: ReminderStatus,
    ) -> Result<Vec<Reminder>, StoreError> {
        Ok(self.collect_where(|r| r.owner_account_id == account_id && r.status == status))
    }

    async fn list_by_status(&self, status: ReminderStatus) -> Result<Vec<Reminder>, StoreError> {
        Ok(self.collect_where(|r| r.status == status))
    }

    async fn update_status(&self, id: i64, status: ReminderStatus) -> Result<(), StoreError> {
        match self.reminders.get_mut(&id) {
            Some(mut entry) => {
                entry.status = status;
                Ok(())
            }
            None => Err(StoreError::Missing(id)),
        }
    }

    async fn delete_by_id_and_account(
        &self,
        id: i64,
        account_id: &str,
    ) -> Result<DeleteOutcome, StoreError> {
        let removed = self
            .reminders
            .remove_if(&id, |_, reminder| reminder.owner_account_id == account_id);
        Ok(if removed.is_some() {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_reminder(chat_id: &str, account: &str, message: &str) -> NewReminder {
        let now = Utc::now();
        NewReminder {
            owner_chat_id: chat_id.to_string(),
            owner_account_id: account.to_string(),
            message: message.to_string(),
            created_at: now,
            due_at: now + Duration::minutes(10),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();
        let draft = new_reminder("alice/home", "alice", " Water plants");
        let id = store.create(draft.clone()).await.unwrap();

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored, draft.into_reminder(id));
        assert_eq!(stored.status, ReminderStatus::Active);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = MemoryStore::new();
        let a = store.create(new_reminder("a/1", "a", " one")).await.unwrap();
        let b = store.create(new_reminder("a/1", "a", " two")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_account_and_status() {
        let store = MemoryStore::new();
        let a1 = store.create(new_reminder("a/1", "a", " one")).await.unwrap();
        store.create(new_reminder("a/1", "a", " two")).await.unwrap();
        store.create(new_reminder("b/1", "b", " three")).await.unwrap();
        store.update_status(a1, ReminderStatus::Sent).await.unwrap();

        let active = store
            .list_by_account_and_status("a", ReminderStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, " two");

        assert_eq!(store.list_by_status(ReminderStatus::Active).await.unwrap().len(), 2);
        assert_eq!(store.list_by_status(ReminderStatus::Sent).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_an_error() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.update_status(5, ReminderStatus::Sent).await,
            Err(StoreError::Missing(5))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let store = MemoryStore::new();
        let id = store.create(new_reminder("a/1", "a", " mine")).await.unwrap();

        assert_eq!(
            store.delete_by_id_and_account(id, "b").await.unwrap(),
            DeleteOutcome::NotFound
        );
        assert!(store.get(id).await.unwrap().is_some());

        assert_eq!(
            store.delete_by_id_and_account(id, "a").await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert!(store.get(id).await.unwrap().is_none());
        assert_eq!(
            store.delete_by_id_and_account(id, "a").await.unwrap(),
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_remove_owned_rejects_malformed_ids() {
        let store = MemoryStore::new();
        let id = store.create(new_reminder("a/1", "a", " mine")).await.unwrap();

        assert_eq!(
            store.remove_owned("abc", "a").await.unwrap(),
            RemoveOutcome::InvalidId
        );
        assert_eq!(
            store.remove_owned(&id.to_string(), "a").await.unwrap(),
            RemoveOutcome::Deleted
        );
        assert!(store.is_empty());
    }
}
