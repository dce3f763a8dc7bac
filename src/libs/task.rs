use crate::libs::error::StoreError;
use chrono::NaiveDateTime;

/// Deadline format accepted from users: `DD.MM.YYYY HH:MM`.
pub const DUE_INPUT_FORMAT: &str = "%d.%m.%Y %H:%M";
/// Minute-precision rendering used in listings and reminders.
pub const DUE_DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One user's to-do item with a deadline and completion flag.
///
/// Deadlines are naive local timestamps; the service does no timezone
/// handling. `note` is part of the persisted shape but unused by the
/// current commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub due_at: NaiveDateTime,
    pub done: bool,
    pub note: Option<String>,
}

impl Task {
    pub fn new(title: &str, due_at: NaiveDateTime) -> Self {
        Task {
            id: None,
            title: title.to_string(),
            due_at,
            done: false,
            note: None,
        }
    }

    pub fn due_text(&self) -> String {
        self.due_at.format(DUE_DISPLAY_FORMAT).to_string()
    }

    /// Listing line: `"{id}. {title} — {due_at} {✅|❌}"`.
    pub fn list_line(&self) -> String {
        let marker = if self.done { "✅" } else { "❌" };
        format!("{}. {} — {} {}", self.id.unwrap_or(0), self.title, self.due_text(), marker)
    }

    /// Reminder line: `"{id}. {title} — {due_at}"`.
    pub fn reminder_line(&self) -> String {
        format!("{}. {} — {}", self.id.unwrap_or(0), self.title, self.due_text())
    }
}

/// Parses a user-supplied deadline in [`DUE_INPUT_FORMAT`].
///
/// Validation happens here, at the adapter boundary; the store receives
/// already-parsed values.
pub fn parse_due(input: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(input.trim(), DUE_INPUT_FORMAT)
        .map_err(|_| StoreError::Validation(format!("invalid deadline '{}', expected DD.MM.YYYY HH:MM", input.trim())))
}
