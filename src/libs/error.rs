//! Error taxonomy for the task store and outbound delivery.
//!
//! Validation problems are reported back to the user by the adapter that
//! received the input; storage failures surface to the caller of the specific
//! operation and are never retried automatically. Delivery failures are
//! contained inside the reminder sweep's per-user iteration.

use thiserror::Error;

/// Failures raised by the per-user task store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed input that reached the store (empty title, bad date).
    #[error("{0}")]
    Validation(String),

    /// I/O or schema failure in the underlying database.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The database file or its directory could not be reached.
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures to deliver an outbound message to a user.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The messaging API answered with `ok: false` (blocked bot,
    /// deactivated account and the like).
    #[error("api error: {0}")]
    Api(String),

    #[error("delivery timed out after {0}s")]
    Timeout(u64),
}
