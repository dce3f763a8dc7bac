//! Foreground runner for the watch command.
//!
//! Runs the bot transport and the reminder sweep as independent tasks so a
//! slow reminder delivery never stalls interactive replies, and shuts both
//! down on SIGTERM/SIGINT (Ctrl-C on Windows).

use crate::api::telegram::TelegramClient;
use crate::libs::bot::Bot;
use crate::libs::messages::Message;
use crate::libs::reminder::Sweep;
use crate::{msg_error, msg_info, msg_warning};
use anyhow::Result;

/// Runs both execution contexts with proper signal handling for graceful
/// shutdown. Returns when the bot finishes (operator /stop) or a shutdown
/// signal arrives.
pub async fn run_with_signal_handling(bot: Bot, sweep: Sweep<TelegramClient>) -> Result<()> {
    // Set up a channel to handle shutdown signals
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate()).expect(&Message::FailedToCreateSigtermHandler.to_string());
            let mut sigint = signal(SignalKind::interrupt()).expect(&Message::FailedToCreateSigintHandler.to_string());

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatchReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatchReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatchReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatchCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        // For other platforms, just run without signal handling
        msg_warning!(Message::WatchSignalHandlingNotSupported);
    }

    let bot_handle = tokio::spawn(async move { bot.run().await });
    let sweep_handle = tokio::spawn(async move { sweep.run().await });

    // Wait for either context to finish or a shutdown signal; the sweep
    // task is dropped with the process when the bot stops.
    tokio::select! {
        result = bot_handle => {
            match result {
                Ok(Ok(())) => msg_info!(Message::BotExitedNormally),
                Ok(Err(e)) => msg_error!(Message::BotError(e.to_string())),
                Err(e) => msg_error!(Message::BotTaskPanicked(e.to_string())),
            }
        }
        result = sweep_handle => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => msg_error!(Message::SweepError(e.to_string())),
                Err(e) => msg_error!(Message::SweepTaskPanicked(e.to_string())),
            }
        }
        _ = shutdown_rx => {
            msg_info!(Message::WatchShuttingDown);
        }
    }

    Ok(())
}
