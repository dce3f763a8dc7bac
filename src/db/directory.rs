//! Store directory: which users currently have a collection.
//!
//! There is no separate user registry; the set of known users is derived by
//! scanning the database for tables following the per-user naming rule. The
//! existence of a user's table IS the registry entry, so the directory can
//! never drift from the actual collections. The full scan is acceptable for
//! a sweep that runs a few times per day.

use super::db::Db;
use super::tasks::TABLE_PREFIX;
use crate::libs::error::StoreError;
use rusqlite::Connection;
use std::collections::BTreeSet;

const SELECT_TABLE_NAMES: &str = "SELECT name FROM sqlite_master WHERE type = 'table'";

pub struct Directory {
    conn: Connection,
}

impl Directory {
    pub fn new() -> Result<Directory, StoreError> {
        Ok(Directory { conn: Db::new()?.conn })
    }

    /// Returns every user id that currently has a collection.
    ///
    /// Tables not matching the naming convention (including SQLite's own
    /// bookkeeping tables) are ignored, not errors. Empty set on a fresh
    /// database.
    pub fn known_user_ids(&self) -> Result<BTreeSet<i64>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_TABLE_NAMES)?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut user_ids = BTreeSet::new();
        for name in names {
            if let Some(user_id) = parse_user_table(&name?) {
                user_ids.insert(user_id);
            }
        }
        Ok(user_ids)
    }
}

/// Inverse of the per-user naming rule: extracts the id from `USER_<id>`.
///
/// Strict about the suffix being all decimal digits so unrelated tables
/// that merely share the prefix are skipped.
pub fn parse_user_table(name: &str) -> Option<i64> {
    let digits = name.strip_prefix(TABLE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
