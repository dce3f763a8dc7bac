//! API client modules for the chat platform.
//!
//! The only external service nudge talks to is the Telegram Bot API: long
//! polling for inbound commands and `sendMessage` for replies and reminders.

pub mod telegram;

pub use telegram::TelegramClient;
