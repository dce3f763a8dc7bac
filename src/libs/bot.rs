//! Conversational adapter: long polling and chat command dispatch.
//!
//! The adapter resolves the acting user identity from each update, parses
//! the command text, and invokes exactly one store operation. Date format
//! and argument validation happen here; the store receives parsed values.
//! Each handled command opens its own store connection, independent of the
//! reminder sweep running in the same process.

use crate::api::telegram::{ChatMessage, TelegramClient};
use crate::db::tasks::TaskStore;
use crate::libs::config::BotConfig;
use crate::libs::error::StoreError;
use crate::libs::messages::Message;
use crate::libs::task::{parse_due, Task};
use crate::{msg_debug, msg_error, msg_info};
use anyhow::Result;
use chrono::NaiveDateTime;
use std::time::Duration;
use tokio::time;

/// Pause before re-polling after a transport error.
const POLL_RETRY_DELAY_SECS: u64 = 5;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    New { due_at: NaiveDateTime, title: String },
    Tasks,
    Done(i64),
    Undone(i64),
    Delete(i64),
    Help,
    Stop,
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Stop,
}

/// Parses a chat message into a command.
///
/// Returns `None` for plain text not addressed to the bot; `Err` carries
/// the usage reply for a recognized command with bad arguments.
pub fn parse_command(text: &str) -> Option<Result<Command, Message>> {
    let mut parts = text.split_whitespace();
    let head = parts.next()?.strip_prefix('/')?;
    // Group chats address commands as /new@SomeBot.
    let name = head.split('@').next().unwrap_or(head);
    let args: Vec<&str> = parts.collect();

    Some(match name {
        "new" => parse_new(&args),
        "tasks" => Ok(Command::Tasks),
        "done" => parse_task_id(&args, Message::UsageDone).map(Command::Done),
        "undone" => parse_task_id(&args, Message::UsageUndone).map(Command::Undone),
        "delete" => parse_task_id(&args, Message::UsageDelete).map(Command::Delete),
        "help" => Ok(Command::Help),
        "stop" => Ok(Command::Stop),
        _ => Err(Message::UnknownCommand),
    })
}

fn parse_new(args: &[&str]) -> Result<Command, Message> {
    if args.len() < 3 {
        return Err(Message::UsageNew);
    }
    let due_at = parse_due(&format!("{} {}", args[0], args[1])).map_err(|_| Message::InvalidDueDate)?;
    Ok(Command::New {
        due_at,
        title: args[2..].join(" "),
    })
}

fn parse_task_id(args: &[&str], usage: Message) -> Result<i64, Message> {
    args.first().and_then(|raw| raw.parse().ok()).ok_or(usage)
}

/// Builds the /tasks reply: header plus one line per task.
pub fn task_list_text(tasks: &[Task]) -> String {
    let mut lines = vec![Message::TasksHeader.to_string()];
    lines.extend(tasks.iter().map(Task::list_line));
    lines.join("\n")
}

/// Executes a command for the acting user and returns the reply text.
///
/// Validation problems become the reply itself; storage failures are logged
/// and answered with a generic failure message so the bot keeps running.
pub fn dispatch(user_id: i64, command: &Command) -> String {
    match try_dispatch(user_id, command) {
        Ok(reply) => reply,
        Err(StoreError::Validation(reason)) => reason,
        Err(e) => {
            msg_error!(Message::CommandFailed(user_id, e.to_string()));
            Message::StorageUnavailable.to_string()
        }
    }
}

fn try_dispatch(user_id: i64, command: &Command) -> Result<String, StoreError> {
    let store = TaskStore::new()?;
    Ok(match command {
        Command::New { due_at, title } => {
            store.add_task(user_id, &Task::new(title, *due_at))?;
            Message::TaskAdded(title.clone()).to_string()
        }
        Command::Tasks => {
            let tasks = store.list_tasks(user_id)?;
            if tasks.is_empty() {
                Message::NoTasks.to_string()
            } else {
                task_list_text(&tasks)
            }
        }
        Command::Done(task_id) => {
            store.mark_done(user_id, *task_id, true)?;
            Message::TaskDone.to_string()
        }
        Command::Undone(task_id) => {
            store.mark_done(user_id, *task_id, false)?;
            Message::TaskUndone.to_string()
        }
        Command::Delete(task_id) => {
            store.delete_task(user_id, *task_id)?;
            Message::TaskDeleted.to_string()
        }
        Command::Help => Message::HelpText.to_string(),
        Command::Stop => Message::BotStopped.to_string(),
    })
}

pub struct Bot {
    client: TelegramClient,
    poll_timeout_secs: u64,
}

impl Bot {
    pub fn new(client: TelegramClient, config: &BotConfig) -> Self {
        Bot {
            client,
            poll_timeout_secs: config.poll_timeout_secs,
        }
    }

    /// Long-polling update loop. Returns only when an operator sends /stop;
    /// transport errors are logged and polling resumes after a short pause.
    pub async fn run(&self) -> Result<()> {
        msg_info!(Message::BotStarted);
        let mut offset = 0i64;

        loop {
            let updates = match self.client.get_updates(offset, self.poll_timeout_secs).await {
                Ok(updates) => updates,
                Err(e) => {
                    msg_error!(Message::BotPollFailed(e.to_string()));
                    time::sleep(Duration::from_secs(POLL_RETRY_DELAY_SECS)).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                if let Some(message) = update.message {
                    if self.handle_message(&message).await == Flow::Stop {
                        msg_info!(Message::BotStopped);
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn handle_message(&self, message: &ChatMessage) -> Flow {
        let Some(text) = message.text.as_deref() else { return Flow::Continue };
        let Some(parsed) = parse_command(text) else { return Flow::Continue };

        // The acting identity is the sender; channel posts without a sender
        // fall back to the chat itself.
        let user_id = message.from.as_ref().map(|user| user.id).unwrap_or(message.chat.id);
        msg_debug!(format!("command from {}: {}", user_id, text));

        let (reply, flow) = match parsed {
            Err(usage) => (usage.to_string(), Flow::Continue),
            Ok(command) => {
                let reply = dispatch(user_id, &command);
                let flow = if matches!(command, Command::Stop) { Flow::Stop } else { Flow::Continue };
                (reply, flow)
            }
        };

        if let Err(e) = self.client.send_message(message.chat.id, &reply).await {
            msg_error!(Message::ReplyFailed(message.chat.id, e.to_string()));
        }
        flow
    }
}
