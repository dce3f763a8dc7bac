//! Per-user task store with dynamic table provisioning.
//!
//! Each user's records live in their own table, named by embedding the
//! numeric user identity (`USER_<id>`). The table is created the first time
//! any operation targets that user and dropped again when its last record is
//! deleted; an empty collection never persists. Table names are derived only
//! through [`table_name`] from a typed integer, so no user-controlled text
//! can reach SQL.

use super::db::Db;
use crate::libs::error::StoreError;
use crate::libs::task::Task;
use rusqlite::{params, Connection};

pub(crate) const TABLE_PREFIX: &str = "USER_";

const SELECT_COLUMNS: &str = "SELECT id, title, due_at, done, note FROM";

/// The naming rule for per-user collections: prefix plus the numeric id.
fn table_name(user_id: i64) -> String {
    format!("{}{}", TABLE_PREFIX, user_id)
}

pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Opens a store over its own database connection.
    pub fn new() -> Result<TaskStore, StoreError> {
        Ok(TaskStore { conn: Db::new()?.conn })
    }

    /// Creates the backing table for `user_id` if it does not exist yet.
    ///
    /// Idempotent; called implicitly by every other operation so a user's
    /// collection is never partially visible.
    pub fn ensure_collection(&self, user_id: i64) -> Result<(), StoreError> {
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    due_at TEXT NOT NULL,
                    done INTEGER DEFAULT 0,
                    note TEXT
                )",
                table_name(user_id)
            ),
            [],
        )?;
        Ok(())
    }

    /// Appends a new task and returns its assigned id.
    ///
    /// Ids are assigned by the database, ascending and never reused while
    /// the collection lives. Adapters validate input first; empty titles are
    /// still rejected here.
    pub fn add_task(&self, user_id: i64, task: &Task) -> Result<i64, StoreError> {
        if task.title.trim().is_empty() {
            return Err(StoreError::Validation("task title must not be empty".to_string()));
        }
        self.ensure_collection(user_id)?;
        self.conn.execute(
            &format!("INSERT INTO {} (title, due_at, done, note) VALUES (?1, ?2, ?3, ?4)", table_name(user_id)),
            params![task.title, task.due_at, task.done, task.note],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns the user's tasks in insertion order (id ascending).
    ///
    /// A user without a collection gets an empty list, not an error.
    pub fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, StoreError> {
        self.fetch(user_id, &format!("{} {} ORDER BY id", SELECT_COLUMNS, table_name(user_id)))
    }

    /// Returns the user's unfinished tasks, same ordering rule.
    pub fn pending_tasks(&self, user_id: i64) -> Result<Vec<Task>, StoreError> {
        self.fetch(user_id, &format!("{} {} WHERE done = 0 ORDER BY id", SELECT_COLUMNS, table_name(user_id)))
    }

    /// Sets the `done` flag of the identified task.
    ///
    /// A missing id is a no-op, not an error.
    pub fn mark_done(&self, user_id: i64, task_id: i64, done: bool) -> Result<(), StoreError> {
        self.ensure_collection(user_id)?;
        self.conn
            .execute(&format!("UPDATE {} SET done = ?1 WHERE id = ?2", table_name(user_id)), params![done, task_id])?;
        Ok(())
    }

    /// Removes the identified task; a missing id is a no-op.
    ///
    /// When the deletion leaves the collection empty, the backing table is
    /// dropped entirely so the user disappears from the store directory
    /// until their next task.
    pub fn delete_task(&self, user_id: i64, task_id: i64) -> Result<(), StoreError> {
        let table = table_name(user_id);
        self.ensure_collection(user_id)?;
        self.conn.execute(&format!("DELETE FROM {} WHERE id = ?1", table), params![task_id])?;

        let remaining: i64 = self.conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        if remaining == 0 {
            self.conn.execute(&format!("DROP TABLE {}", table), [])?;
        }
        Ok(())
    }

    fn fetch(&self, user_id: i64, sql: &str) -> Result<Vec<Task>, StoreError> {
        self.ensure_collection(user_id)?;
        let mut stmt = self.conn.prepare(sql)?;
        let task_iter = stmt.query_map([], |row| {
            Ok(Task {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                due_at: row.get(2)?,
                done: row.get(3)?,
                note: row.get(4)?,
            })
        })?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }
}
