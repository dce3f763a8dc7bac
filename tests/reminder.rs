#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use nudge::db::tasks::TaskStore;
    use nudge::libs::config::SweepConfig;
    use nudge::libs::error::DeliveryError;
    use nudge::libs::reminder::{reminder_text, Delivery, Sweep};
    use nudge::libs::task::Task;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct SweepTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl AsyncTestContext for SweepTestContext {
        async fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SweepTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    /// Delivery mock that records every message and optionally refuses one
    /// recipient, like a user who blocked the bot.
    #[derive(Clone)]
    struct RecordingDelivery {
        calls: Arc<Mutex<Vec<(i64, String)>>>,
        fail_for: Option<i64>,
    }

    impl RecordingDelivery {
        fn new(fail_for: Option<i64>) -> Self {
            RecordingDelivery {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_for,
            }
        }
    }

    impl Delivery for RecordingDelivery {
        async fn deliver(&self, user_id: i64, text: &str) -> Result<(), DeliveryError> {
            if Some(user_id) == self.fail_for {
                return Err(DeliveryError::Api("Forbidden: bot was blocked by the user".to_string()));
            }
            self.calls.lock().unwrap().push((user_id, text.to_string()));
            Ok(())
        }
    }

    /// Delivery mock that never completes, to exercise the per-user timeout.
    struct StallingDelivery;

    impl Delivery for StallingDelivery {
        async fn deliver(&self, _user_id: i64, _text: &str) -> Result<(), DeliveryError> {
            std::future::pending::<Result<(), DeliveryError>>().await
        }
    }

    fn due(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test_context(SweepTestContext)]
    #[tokio::test]
    async fn test_pass_notifies_only_users_with_pending(_ctx: &mut SweepTestContext) {
        let store = TaskStore::new().unwrap();
        let done_id = store.add_task(1, &Task::new("Already done", due(2025, 1, 15, 10, 0))).unwrap();
        store.mark_done(1, done_id, true).unwrap();
        store.add_task(2, &Task::new("Report", due(2025, 2, 1, 9, 0))).unwrap();

        let delivery = RecordingDelivery::new(None);
        let calls = delivery.calls.clone();
        let sweep = Sweep::new(delivery, SweepConfig::default());

        let stats = sweep.pass().await.unwrap();
        assert_eq!(stats.users, 2);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.failures, 0);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 2);
        assert!(calls[0].1.starts_with("Reminder! You have pending tasks:"));
        assert!(calls[0].1.contains("1. Report — 2025-02-01T09:00"));
    }

    #[test_context(SweepTestContext)]
    #[tokio::test]
    async fn test_pass_isolates_per_user_delivery_failure(_ctx: &mut SweepTestContext) {
        let store = TaskStore::new().unwrap();
        store.add_task(2, &Task::new("Blocked user's task", due(2025, 2, 1, 9, 0))).unwrap();
        store.add_task(3, &Task::new("Reachable user's task", due(2025, 2, 2, 9, 0))).unwrap();

        let delivery = RecordingDelivery::new(Some(2));
        let calls = delivery.calls.clone();
        let sweep = Sweep::new(delivery, SweepConfig::default());

        let stats = sweep.pass().await.unwrap();
        assert_eq!(stats.users, 2);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.failures, 1);

        // The unreachable user never suppresses reminders to others.
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 3);
    }

    #[test_context(SweepTestContext)]
    #[tokio::test]
    async fn test_pass_on_empty_database(_ctx: &mut SweepTestContext) {
        let delivery = RecordingDelivery::new(None);
        let calls = delivery.calls.clone();
        let sweep = Sweep::new(delivery, SweepConfig::default());

        let stats = sweep.pass().await.unwrap();
        assert_eq!(stats.users, 0);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.failures, 0);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test_context(SweepTestContext)]
    #[tokio::test]
    async fn test_stalled_delivery_times_out_as_failure(_ctx: &mut SweepTestContext) {
        let store = TaskStore::new().unwrap();
        store.add_task(4, &Task::new("Never delivered", due(2025, 2, 3, 9, 0))).unwrap();

        let config = SweepConfig {
            delivery_timeout_secs: 1,
            ..Default::default()
        };
        let sweep = Sweep::new(StallingDelivery, config);

        let stats = sweep.pass().await.unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn test_reminder_text_format() {
        let mut task = Task::new("Report", due(2025, 2, 1, 9, 0));
        task.id = Some(5);

        assert_eq!(reminder_text(&[task]), "Reminder! You have pending tasks:\n5. Report — 2025-02-01T09:00");
    }
}
