//! Configuration management for the nudge application.
//!
//! Settings are stored as JSON in the platform data directory and edited
//! through an interactive wizard (`nudge init`). The configuration is
//! modular: the Telegram transport and the reminder sweep can be set up
//! independently, and each falls back to sensible defaults when absent.

use super::data_storage::DataStorage;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";
/// Environment override for the bot token, so deployments can keep it off disk.
pub const BOT_TOKEN_ENV: &str = "NUDGE_BOT_TOKEN";

/// A configurable module shown in the interactive setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Telegram transport settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BotConfig {
    /// Bot API token; [`BOT_TOKEN_ENV`] takes precedence over this value.
    pub token: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll timeout passed to `getUpdates`, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            token: None,
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

impl BotConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "bot".to_string(),
            name: "Telegram Bot".to_string(),
        }
    }

    pub fn init(existing: &Option<BotConfig>) -> Result<BotConfig> {
        let current = existing.clone().unwrap_or_default();
        let token: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Bot API token (leave empty to use {})", BOT_TOKEN_ENV))
            .allow_empty(true)
            .interact_text()?;
        let poll_timeout_secs: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Long-poll timeout in seconds")
            .default(current.poll_timeout_secs)
            .interact_text()?;

        Ok(BotConfig {
            token: if token.is_empty() { current.token } else { Some(token) },
            api_url: current.api_url,
            poll_timeout_secs,
        })
    }

    /// The token actually used at runtime: environment first, config second.
    pub fn resolve_token(&self) -> Option<String> {
        env::var(BOT_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .or_else(|| self.token.clone().filter(|token| !token.is_empty()))
    }
}

/// Reminder sweep schedule and hardening knobs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SweepConfig {
    /// Period between reminder passes.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
    /// Delay before the first pass after process start.
    #[serde(default = "default_startup_delay")]
    pub startup_delay_secs: u64,
    /// Upper bound on a single reminder delivery, so one unreachable user
    /// cannot stall the whole pass.
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_secs: u64,
}

fn default_interval_hours() -> u64 {
    6
}

fn default_startup_delay() -> u64 {
    10
}

fn default_delivery_timeout() -> u64 {
    5
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            interval_hours: default_interval_hours(),
            startup_delay_secs: default_startup_delay(),
            delivery_timeout_secs: default_delivery_timeout(),
        }
    }
}

impl SweepConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "sweep".to_string(),
            name: "Reminder Sweep".to_string(),
        }
    }

    pub fn init(existing: &Option<SweepConfig>) -> Result<SweepConfig> {
        let current = existing.clone().unwrap_or_default();
        let interval_hours: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Hours between reminder passes")
            .default(current.interval_hours)
            .interact_text()?;
        let startup_delay_secs: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Seconds before the first pass")
            .default(current.startup_delay_secs)
            .interact_text()?;
        let delivery_timeout_secs: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Per-user delivery timeout in seconds")
            .default(current.delivery_timeout_secs)
            .interact_text()?;

        Ok(SweepConfig {
            interval_hours,
            startup_delay_secs,
            delivery_timeout_secs,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepConfig>,
}

impl Config {
    /// Loads the stored configuration, or the defaults when none exists.
    pub fn read() -> Result<Self> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn delete() -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Interactive setup: pick modules, then configure each in turn.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;
        let modules = [BotConfig::module(), SweepConfig::module()];
        let names: Vec<&str> = modules.iter().map(|module| module.name.as_str()).collect();

        let selection = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select modules to configure")
            .items(&names)
            .interact()?;

        for index in selection {
            match modules[index].key.as_str() {
                "bot" => config.bot = Some(BotConfig::init(&config.bot)?),
                "sweep" => config.sweep = Some(SweepConfig::init(&config.sweep)?),
                _ => {}
            }
        }
        Ok(config)
    }
}
