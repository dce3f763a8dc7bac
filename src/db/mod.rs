//! Database layer for the nudge application.
//!
//! Built on SQLite with one isolated table per user. Each execution context
//! opens its own connection through [`db::Db`]; there is no shared handle
//! between interactive command handling and the timer-driven reminder sweep.

/// Core database connection management.
pub mod db;

/// Store directory: discovers known users by introspecting table names.
pub mod directory;

/// Per-user task store with lazy table provisioning and reclamation.
pub mod tasks;
