#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use nudge::db::directory::Directory;
    use nudge::db::tasks::TaskStore;
    use nudge::libs::error::StoreError;
    use nudge::libs::task::Task;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Storage paths are resolved through process-global environment
    // variables; run these tests one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct StoreTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StoreTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    fn due(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_add_and_list_roundtrip(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        let id = store.add_task(42, &Task::new("Buy milk", due(2025, 1, 1, 18, 0))).unwrap();
        assert_eq!(id, 1);

        let tasks = store.list_tasks(42).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, Some(1));
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].due_at, due(2025, 1, 1, 18, 0));
        assert!(!tasks[0].done);
        assert_eq!(tasks[0].note, None);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_empty_title_rejected(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        let result = store.add_task(42, &Task::new("   ", due(2025, 1, 1, 18, 0)));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_users_are_isolated(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        store.add_task(1, &Task::new("First user's task", due(2025, 3, 1, 9, 0))).unwrap();
        store.add_task(2, &Task::new("Second user's task", due(2025, 3, 2, 9, 0))).unwrap();

        let first = store.list_tasks(1).unwrap();
        let second = store.list_tasks(2).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0].title, "First user's task");
        assert_eq!(second[0].title, "Second user's task");
        // Ids are assigned independently per user.
        assert_eq!(first[0].id, Some(1));
        assert_eq!(second[0].id, Some(1));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_mark_done_roundtrip(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        let id = store.add_task(7, &Task::new("Report", due(2025, 2, 1, 9, 0))).unwrap();
        store.mark_done(7, id, true).unwrap();
        assert!(store.pending_tasks(7).unwrap().is_empty());
        assert!(store.list_tasks(7).unwrap()[0].done);

        store.mark_done(7, id, false).unwrap();
        let pending = store.pending_tasks(7).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, Some(id));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_mark_done_missing_id_is_noop(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        store.add_task(7, &Task::new("Report", due(2025, 2, 1, 9, 0))).unwrap();
        store.mark_done(7, 99, true).unwrap();

        let tasks = store.list_tasks(7).unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].done);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_delete_missing_id_is_noop(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        store.add_task(7, &Task::new("Report", due(2025, 2, 1, 9, 0))).unwrap();
        store.delete_task(7, 99).unwrap();

        assert_eq!(store.list_tasks(7).unwrap().len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_delete_does_not_touch_other_users(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        let id = store.add_task(1, &Task::new("Mine", due(2025, 4, 1, 8, 0))).unwrap();
        store.add_task(2, &Task::new("Theirs", due(2025, 4, 1, 8, 0))).unwrap();

        store.delete_task(1, id).unwrap();

        assert!(store.list_tasks(1).unwrap().is_empty());
        assert_eq!(store.list_tasks(2).unwrap().len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_last_delete_reclaims_collection(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();
        let directory = Directory::new().unwrap();

        let id = store.add_task(42, &Task::new("Only one", due(2025, 5, 1, 12, 0))).unwrap();
        store.mark_done(42, id, true).unwrap();
        assert!(directory.known_user_ids().unwrap().contains(&42));

        store.delete_task(42, id).unwrap();
        assert!(!directory.known_user_ids().unwrap().contains(&42));

        // The collection transparently re-appears on next use, with ids
        // starting over.
        let id = store.add_task(42, &Task::new("Back again", due(2025, 5, 2, 12, 0))).unwrap();
        assert_eq!(id, 1);
        assert!(directory.known_user_ids().unwrap().contains(&42));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_ids_never_reused_while_collection_lives(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        store.add_task(5, &Task::new("One", due(2025, 6, 1, 10, 0))).unwrap();
        let second = store.add_task(5, &Task::new("Two", due(2025, 6, 2, 10, 0))).unwrap();
        store.delete_task(5, second).unwrap();

        let third = store.add_task(5, &Task::new("Three", due(2025, 6, 3, 10, 0))).unwrap();
        assert_eq!(third, 3);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_pending_is_done_filtered_subset(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new().unwrap();

        for i in 1..=4 {
            store.add_task(9, &Task::new(&format!("Task {}", i), due(2025, 7, i, 9, 0))).unwrap();
        }
        store.mark_done(9, 2, true).unwrap();
        store.mark_done(9, 4, true).unwrap();

        let all = store.list_tasks(9).unwrap();
        let pending = store.pending_tasks(9).unwrap();

        let expected: Vec<&Task> = all.iter().filter(|task| !task.done).collect();
        assert_eq!(pending.len(), expected.len());
        for (got, want) in pending.iter().zip(expected) {
            assert_eq!(got, want);
        }
        // Insertion order is preserved.
        assert_eq!(pending[0].id, Some(1));
        assert_eq!(pending[1].id, Some(3));
    }
}
