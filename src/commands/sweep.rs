//! Runs a single reminder pass immediately.
//!
//! Useful for trying out the delivery setup without waiting for the
//! scheduled sweep.

use crate::api::telegram::TelegramClient;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::reminder::Sweep;
use crate::{msg_error_anyhow, msg_success};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let bot_config = config.bot.unwrap_or_default();
    let token = bot_config.resolve_token().ok_or_else(|| msg_error_anyhow!(Message::BotTokenMissing))?;

    let sweep = Sweep::new(TelegramClient::new(&bot_config, &token), config.sweep.unwrap_or_default());
    let stats = sweep.pass().await?;

    msg_success!(Message::SweepPassCompleted {
        users: stats.users,
        delivered: stats.delivered,
        failures: stats.failures,
    });
    Ok(())
}
