//! Periodic reminder sweep.
//!
//! On a fixed period the sweep discovers every user with a collection,
//! fetches their pending tasks, and hands one message per user to the
//! delivery collaborator. The sweep holds no state between passes; each
//! pass re-derives the full picture from storage.

use crate::db::directory::Directory;
use crate::db::tasks::TaskStore;
use crate::libs::config::SweepConfig;
use crate::libs::error::DeliveryError;
use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::{msg_error, msg_info};
use anyhow::Result;
use std::time::Duration;
use tokio::time;

/// Outbound "deliver text to user identity" collaborator.
///
/// Implemented by the Telegram client in production and by recording mocks
/// in tests. A failed delivery concerns only that recipient.
#[allow(async_fn_in_trait)]
pub trait Delivery {
    async fn deliver(&self, user_id: i64, text: &str) -> Result<(), DeliveryError>;
}

/// Counters reported after each pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepStats {
    pub users: usize,
    pub delivered: usize,
    pub failures: usize,
}

pub struct Sweep<D> {
    delivery: D,
    config: SweepConfig,
}

impl<D: Delivery> Sweep<D> {
    pub fn new(delivery: D, config: SweepConfig) -> Self {
        Sweep { delivery, config }
    }

    /// Runs passes forever on the configured period, after a short startup
    /// delay. Pass-level failures are logged and the schedule continues.
    pub async fn run(&self) -> Result<()> {
        msg_info!(Message::SweepStarted {
            interval_hours: self.config.interval_hours,
            startup_delay_secs: self.config.startup_delay_secs,
        });
        time::sleep(Duration::from_secs(self.config.startup_delay_secs)).await;

        let mut interval = time::interval(Duration::from_secs(self.config.interval_hours * 60 * 60));
        loop {
            interval.tick().await;
            match self.pass().await {
                Ok(stats) => msg_info!(Message::SweepPassCompleted {
                    users: stats.users,
                    delivered: stats.delivered,
                    failures: stats.failures,
                }),
                Err(e) => msg_error!(Message::SweepError(e.to_string())),
            }
        }
    }

    /// One full pass over all known users.
    ///
    /// Opens its own storage connections, distinct from any interactive
    /// handler running concurrently. Storage and delivery failures are
    /// contained per user: one unreachable user never suppresses reminders
    /// to the rest. Each delivery is bounded by the configured timeout.
    pub async fn pass(&self) -> Result<SweepStats> {
        let store = TaskStore::new()?;
        let directory = Directory::new()?;
        let mut stats = SweepStats::default();

        for user_id in directory.known_user_ids()? {
            stats.users += 1;

            let pending = match store.pending_tasks(user_id) {
                Ok(pending) => pending,
                Err(e) => {
                    msg_error!(Message::SweepUserFailed(user_id, e.to_string()));
                    stats.failures += 1;
                    continue;
                }
            };
            if pending.is_empty() {
                continue;
            }

            let text = reminder_text(&pending);
            let timeout = Duration::from_secs(self.config.delivery_timeout_secs);
            match time::timeout(timeout, self.delivery.deliver(user_id, &text)).await {
                Ok(Ok(())) => stats.delivered += 1,
                Ok(Err(e)) => {
                    msg_error!(Message::DeliveryFailed(user_id, e.to_string()));
                    stats.failures += 1;
                }
                Err(_) => {
                    let timed_out = DeliveryError::Timeout(self.config.delivery_timeout_secs);
                    msg_error!(Message::DeliveryFailed(user_id, timed_out.to_string()));
                    stats.failures += 1;
                }
            }
        }
        Ok(stats)
    }
}

/// Builds the outbound reminder: header plus one line per pending task.
pub fn reminder_text(tasks: &[Task]) -> String {
    let mut lines = vec![Message::ReminderHeader.to_string()];
    lines.extend(tasks.iter().map(Task::reminder_line));
    lines.join("\n")
}
