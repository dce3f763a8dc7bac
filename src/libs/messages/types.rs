#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskAdded(String),
    TaskDone,
    TaskUndone,
    TaskDeleted,
    NoTasks,
    TasksHeader,
    StorageUnavailable,
    CommandFailed(i64, String), // user id, error

    // === BOT MESSAGES ===
    BotStarted,
    BotStopped,
    BotTokenMissing,
    BotPollFailed(String),
    ReplyFailed(i64, String), // chat id, error
    UnknownCommand,
    UsageNew,
    UsageDone,
    UsageUndone,
    UsageDelete,
    InvalidDueDate,
    HelpText,

    // === SWEEP MESSAGES ===
    SweepStarted {
        interval_hours: u64,
        startup_delay_secs: u64,
    },
    SweepPassCompleted {
        users: usize,
        delivered: usize,
        failures: usize,
    },
    ReminderHeader,
    SweepUserFailed(i64, String),
    DeliveryFailed(i64, String),
    SweepError(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,

    // === WATCH MESSAGES ===
    WatchShuttingDown,
    WatchReceivedSigterm,
    WatchReceivedSigint,
    WatchReceivedCtrlC,
    WatchCtrlCListenFailed(String),
    WatchSignalHandlingNotSupported,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
    BotExitedNormally,
    BotError(String),
    BotTaskPanicked(String),
    SweepTaskPanicked(String),
}
