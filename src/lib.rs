//! # Nudge - Conversational Task Reminders
//!
//! A chat-driven service for managing personal tasks with deadlines and
//! nudging users about the ones still pending.
//!
//! ## Features
//!
//! - **Task Management**: Create, list, complete, and delete tasks from chat
//!   or the command line
//! - **Per-User Isolation**: Every user gets their own storage collection,
//!   provisioned on first use and reclaimed when emptied
//! - **Reminder Sweep**: A periodic pass that messages every user with
//!   pending work
//! - **Telegram Transport**: Long-polling command dispatch and message
//!   delivery over the Bot API
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nudge::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
