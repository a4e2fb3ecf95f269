//! Periodic sweep that delivers due reminders
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! A reminder is due when its trigger time has passed or falls within one
//! sweep interval from now. Each due reminder gets exactly one delivery
//! attempt and is then marked `SENT`, whatever the transport reported.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::model::{Reminder, ReminderStatus};
use super::store::ReminderStore;
use crate::transport::{ChatAddress, ChatTransport};

/// Counters for one sweep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub scanned: usize,
    pub due: usize,
    pub sent: usize,
    pub delivery_failures: usize,
    /// Due reminders left `ACTIVE` because no send was attempted
    pub skipped: usize,
}

pub struct ReminderScheduler {
    store: Arc<dyn ReminderStore>,
    transport: Arc<dyn ChatTransport>,
    interval: Duration,
}

impl ReminderScheduler {
    /// `interval` is both the sweep cadence and the look-ahead window
    pub fn new(
        store: Arc<dyn ReminderStore>,
        transport: Arc<dyn ChatTransport>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            transport,
            interval,
        }
    }

    /// Sweep forever at the configured interval
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        info!(
            "⏰ Reminder scheduler started (interval: {}s)",
            self.interval.as_secs()
        );

        loop {
            ticker.tick().await;
            debug!("Reminder sweep triggered");
            let report = self.sweep_at(Utc::now()).await;
            if report.due > 0 {
                info!(
                    "Reminder sweep: {} due of {} active, {} delivered, {} failed, {} skipped",
                    report.due, report.scanned, report.sent, report.delivery_failures, report.skipped
                );
            }
        }
    }

    /// Whether `reminder` should fire in a sweep running at `now`
    pub fn is_due(&self, reminder: &Reminder, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(self.interval) {
            Ok(window) => reminder.due_at - now <= window,
            Err(_) => true,
        }
    }

    /// Run one sweep pass as of `now`
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        let active = match self.store.list_by_status(ReminderStatus::Active).await {
            Ok(reminders) => reminders,
            Err(e) => {
                error!("❌ Reminder sweep could not read active reminders: {e}");
                return report;
            }
        };
        report.scanned = active.len();

        for reminder in active.iter().filter(|r| self.is_due(r, now)) {
            report.due += 1;
            self.dispatch(reminder, &mut report).await;
        }

        report
    }

    async fn dispatch(&self, reminder: &Reminder, report: &mut SweepReport) {
        let recipient = match ChatAddress::parse(&reminder.owner_chat_id) {
            Ok(address) => address,
            Err(e) => {
                warn!("Skipping reminder {}: {e}", reminder.id);
                report.skipped += 1;
                return;
            }
        };

        info!(
            "Sending reminder {} to {recipient} | Message: '{}'",
            reminder.id, reminder.message
        );
        match self.transport.send(&recipient, &reminder.message).await {
            Ok(()) => {
                info!("Reminder {} delivered", reminder.id);
                report.sent += 1;
            }
            Err(e) => {
                warn!("Reminder {} could not be delivered: {e}", reminder.id);
                report.delivery_failures += 1;
            }
        }

        if let Err(e) = self
            .store
            .update_status(reminder.id, ReminderStatus::Sent)
            .await
        {
            error!("Failed to mark reminder {} as sent: {e}", reminder.id);
        }
    }
}
