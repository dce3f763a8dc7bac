//! Local task management command.
//!
//! The CLI counterpart of the chat commands: every subcommand acts on one
//! user's collection, identified by `--user`. Deadlines use the same
//! `DD.MM.YYYY HH:MM` format as the bot.

use crate::db::tasks::TaskStore;
use crate::libs::messages::Message;
use crate::libs::task::{parse_due, Task};
use crate::libs::view::View;
use crate::{msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Acting user identity (chat platform user id)
    #[arg(short, long)]
    user: i64,
    #[command(subcommand)]
    command: TaskCommands,
}

#[derive(Debug, Subcommand)]
enum TaskCommands {
    #[command(about = "Add a task with a deadline")]
    New {
        /// Deadline in DD.MM.YYYY HH:MM format
        #[arg(long)]
        due: String,
        /// Task title
        #[arg(required = true)]
        title: Vec<String>,
    },
    #[command(about = "List the user's tasks")]
    List,
    #[command(about = "Mark a task as done")]
    Done { id: i64 },
    #[command(about = "Mark a task as active again")]
    Undone { id: i64 },
    #[command(about = "Delete a task")]
    Delete { id: i64 },
}

pub fn cmd(task_args: TaskArgs) -> Result<()> {
    let store = TaskStore::new()?;
    let user_id = task_args.user;

    match task_args.command {
        TaskCommands::New { due, title } => {
            let due_at = parse_due(&due)?;
            let title = title.join(" ");
            store.add_task(user_id, &Task::new(&title, due_at))?;
            msg_success!(Message::TaskAdded(title));
        }
        TaskCommands::List => {
            let tasks = store.list_tasks(user_id)?;
            if tasks.is_empty() {
                msg_print!(Message::NoTasks);
            } else {
                View::tasks(&tasks)?;
            }
        }
        TaskCommands::Done { id } => {
            store.mark_done(user_id, id, true)?;
            msg_success!(Message::TaskDone);
        }
        TaskCommands::Undone { id } => {
            store.mark_done(user_id, id, false)?;
            msg_success!(Message::TaskUndone);
        }
        TaskCommands::Delete { id } => {
            store.delete_task(user_id, id)?;
            msg_success!(Message::TaskDeleted);
        }
    }
    Ok(())
}
