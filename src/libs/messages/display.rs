//! Display implementation for application messages.
//!
//! Single source of truth for all user-facing text: chat replies, console
//! output, and log lines all render through this impl.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskAdded(title) => format!("Task '{}' added!", title),
            Message::TaskDone => "Task marked as done!".to_string(),
            Message::TaskUndone => "Task is active again.".to_string(),
            Message::TaskDeleted => "Task deleted.".to_string(),
            Message::NoTasks => "You have no tasks.".to_string(),
            Message::TasksHeader => "Your tasks:".to_string(),
            Message::StorageUnavailable => "Storage failure. Please try again later.".to_string(),
            Message::CommandFailed(user_id, e) => format!("Command for user {} failed: {}", user_id, e),

            // === BOT MESSAGES ===
            Message::BotStarted => "Bot is running".to_string(),
            Message::BotStopped => "Bot stopped. See you!".to_string(),
            Message::BotTokenMissing => "Bot token is not configured. Run 'nudge init' or set NUDGE_BOT_TOKEN".to_string(),
            Message::BotPollFailed(e) => format!("Failed to poll for updates: {}", e),
            Message::ReplyFailed(chat_id, e) => format!("Failed to reply to {}: {}", chat_id, e),
            Message::UnknownCommand => "Unknown command. Send /help for the list of commands.".to_string(),
            Message::UsageNew => "Usage: /new <DD.MM.YYYY HH:MM> <task title>".to_string(),
            Message::UsageDone => "Usage: /done <task id>".to_string(),
            Message::UsageUndone => "Usage: /undone <task id>".to_string(),
            Message::UsageDelete => "Usage: /delete <task id>".to_string(),
            Message::InvalidDueDate => "Invalid date format. Use DD.MM.YYYY HH:MM".to_string(),
            Message::HelpText => "Commands:\n\
                /new <DD.MM.YYYY HH:MM> <task title> - add a task\n\
                /tasks - show your task list\n\
                /done <task id>, /undone <task id> - mark a task done/undone\n\
                /delete <task id> - delete a task\n\
                /help - show this message\n\
                /stop - stop the bot (for operators)"
                .to_string(),

            // === SWEEP MESSAGES ===
            Message::SweepStarted {
                interval_hours,
                startup_delay_secs,
            } => format!("Reminder sweep scheduled every {}h, first pass in {}s", interval_hours, startup_delay_secs),
            Message::SweepPassCompleted { users, delivered, failures } => {
                format!("Sweep pass finished: {} users, {} reminders sent, {} failures", users, delivered, failures)
            }
            Message::ReminderHeader => "Reminder! You have pending tasks:".to_string(),
            Message::SweepUserFailed(user_id, e) => format!("Sweep failed for user {}: {}", user_id, e),
            Message::DeliveryFailed(user_id, e) => format!("Could not deliver reminder to {}: {}", user_id, e),
            Message::SweepError(e) => format!("Sweep pass failed: {}", e),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),

            // === WATCH MESSAGES ===
            Message::WatchShuttingDown => "Shutting down...".to_string(),
            Message::WatchReceivedSigterm => "Received SIGTERM, stopping".to_string(),
            Message::WatchReceivedSigint => "Received SIGINT, stopping".to_string(),
            Message::WatchReceivedCtrlC => "Received Ctrl-C, stopping".to_string(),
            Message::WatchCtrlCListenFailed(e) => format!("Failed to listen for Ctrl-C: {}", e),
            Message::WatchSignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
            Message::BotExitedNormally => "Bot loop finished".to_string(),
            Message::BotError(e) => format!("Bot error: {}", e),
            Message::BotTaskPanicked(e) => format!("Bot task panicked: {}", e),
            Message::SweepTaskPanicked(e) => format!("Sweep task panicked: {}", e),
        };
        write!(f, "{}", text)
    }
}
