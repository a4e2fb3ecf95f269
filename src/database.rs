//! # SQLite reminder store
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Timestamps are stored as RFC 3339 strings with nanosecond precision so a
//! stored reminder reads back exactly as it was written.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use sqlite::{Connection, State, Statement};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::features::reminders::model::{NewReminder, Reminder, ReminderStatus};
use crate::features::reminders::store::{DeleteOutcome, ReminderStore, StoreError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS reminders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_chat_id TEXT NOT NULL,
        owner_account_id TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TEXT NOT NULL,
        due_at TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'ACTIVE'
    );
    CREATE INDEX IF NOT EXISTS idx_reminders_account_status
        ON reminders(owner_account_id, status);
    CREATE INDEX IF NOT EXISTS idx_reminders_status
        ON reminders(status);
";

const SELECT_COLUMNS: &str =
    "SELECT id, owner_chat_id, owner_account_id, message, created_at, due_at, status FROM reminders";

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path`; `:memory:` gives a private in-memory database
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let connection = sqlite::open(path)?;
        connection.execute(SCHEMA)?;
        info!("Reminder database ready at {path}");
        Ok(Database {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    async fn query(
        &self,
        sql: &str,
        bindings: &[(usize, &str)],
    ) -> Result<Vec<Reminder>, StoreError> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(sql)?;
        for &binding in bindings {
            statement.bind(binding)?;
        }

        let mut reminders = Vec::new();
        while let State::Row = statement.next()? {
            reminders.push(read_reminder(&statement)?);
        }
        debug!("Query returned {} reminder(s)", reminders.len());
        Ok(reminders)
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(id: i64, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::CorruptRow {
            id,
            reason: format!("bad timestamp '{raw}': {e}"),
        })
}

fn read_reminder(statement: &Statement<'_>) -> Result<Reminder, StoreError> {
    let id = statement.read::<i64, _>("id")?;
    let status_text = statement.read::<String, _>("status")?;
    let status = status_text
        .parse::<ReminderStatus>()
        .map_err(|e| StoreError::CorruptRow {
            id,
            reason: e.to_string(),
        })?;

    Ok(Reminder {
        id,
        owner_chat_id: statement.read::<String, _>("owner_chat_id")?,
        owner_account_id: statement.read::<String, _>("owner_account_id")?,
        message: statement.read::<String, _>("message")?,
        created_at: parse_timestamp(id, &statement.read::<String, _>("created_at")?)?,
        due_at: parse_timestamp(id, &statement.read::<String, _>("due_at")?)?,
        status,
    })
}

/// Run a single-value query such as `SELECT changes()`
fn scalar(connection: &Connection, sql: &str) -> Result<i64, StoreError> {
    let mut statement = connection.prepare(sql)?;
    statement.next()?;
    Ok(statement.read::<i64, _>(0)?)
}

#[async_trait]
impl ReminderStore for Database {
    async fn create(&self, reminder: NewReminder) -> Result<i64, StoreError> {
        let connection = self.connection.lock().await;
        let created_at = format_timestamp(&reminder.created_at);
        let due_at = format_timestamp(&reminder.due_at);
        {
            let mut statement = connection.prepare(
                "INSERT INTO reminders (owner_chat_id, owner_account_id, message, created_at, due_at, status)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            statement.bind((1, reminder.owner_chat_id.as_str()))?;
            statement.bind((2, reminder.owner_account_id.as_str()))?;
            statement.bind((3, reminder.message.as_str()))?;
            statement.bind((4, created_at.as_str()))?;
            statement.bind((5, due_at.as_str()))?;
            statement.bind((6, ReminderStatus::Active.as_str()))?;
            statement.next()?;
        }
        let id = scalar(&connection, "SELECT last_insert_rowid()")?;
        debug!("Inserted reminder {id} for {}", reminder.owner_account_id);
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Reminder>, StoreError> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(format!("{SELECT_COLUMNS} WHERE id = ?"))?;
        statement.bind((1, id))?;
        match statement.next()? {
            State::Row => Ok(Some(read_reminder(&statement)?)),
            State::Done => Ok(None),
        }
    }

    async fn list_by_account_and_status(
        &self,
        account_id: &str,
        status: ReminderStatus,
    ) -> Result<Vec<Reminder>, StoreError> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE owner_account_id = ? AND status = ? ORDER BY id"),
            &[(1, account_id), (2, status.as_str())],
        )
        .await
    }

    async fn list_by_status(&self, status: ReminderStatus) -> Result<Vec<Reminder>, StoreError> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE status = ?"),
            &[(1, status.as_str())],
        )
        .await
    }

    async fn update_status(&self, id: i64, status: ReminderStatus) -> Result<(), StoreError> {
        let connection = self.connection.lock().await;
        {
            let mut statement = connection.prepare("UPDATE reminders SET status = ? WHERE id = ?")?;
            statement.bind((1, status.as_str()))?;
            statement.bind((2, id))?;
            statement.next()?;
        }
        if scalar(&connection, "SELECT changes()")? == 0 {
            return Err(StoreError::Missing(id));
        }
        Ok(())
    }

    async fn delete_by_id_and_account(
        &self,
        id: i64,
        account_id: &str,
    ) -> Result<DeleteOutcome, StoreError> {
        let connection = self.connection.lock().await;
        {
            let mut statement =
                connection.prepare("DELETE FROM reminders WHERE id = ? AND owner_account_id = ?")?;
            statement.bind((1, id))?;
            statement.bind((2, account_id))?;
            statement.next()?;
        }
        let outcome = if scalar(&connection, "SELECT changes()")? > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        };
        Ok(outcome)
    }
}
