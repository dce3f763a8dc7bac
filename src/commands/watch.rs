//! Runs the service: bot polling plus the periodic reminder sweep.

use crate::api::telegram::TelegramClient;
use crate::libs::bot::Bot;
use crate::libs::config::Config;
use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::libs::reminder::Sweep;
use crate::msg_error_anyhow;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let bot_config = config.bot.unwrap_or_default();
    let token = bot_config.resolve_token().ok_or_else(|| msg_error_anyhow!(Message::BotTokenMissing))?;

    let bot = Bot::new(TelegramClient::new(&bot_config, &token), &bot_config);
    let sweep = Sweep::new(TelegramClient::new(&bot_config, &token), config.sweep.unwrap_or_default());

    daemon::run_with_signal_handling(bot, sweep).await
}
