use crate::libs::data_storage::DataStorage;
use crate::libs::error::StoreError;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "nudge.db";

/// Opens the shared SQLite database file.
///
/// Every execution context (interactive command, bot handler, sweep pass)
/// constructs its own connection through this opener; connections are never
/// shared across concurrently running contexts.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn new() -> Result<Db, StoreError> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn: Connection = Connection::open(db_file_path)?;

        Ok(Db { conn })
    }
}
