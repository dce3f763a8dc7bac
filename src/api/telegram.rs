//! Minimal Telegram Bot API client.
//!
//! Covers exactly the surface the service needs: `getUpdates` long polling
//! for inbound commands and `sendMessage` for replies and reminders. Every
//! response is unwrapped from Telegram's `{ok, result, description}`
//! envelope; `ok: false` surfaces as [`DeliveryError::Api`].

use crate::libs::config::BotConfig;
use crate::libs::error::DeliveryError;
use crate::libs::reminder::Delivery;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

const GET_UPDATES_URL: &str = "getUpdates";
const SEND_MESSAGE_URL: &str = "sendMessage";

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// An inbound chat message; only the fields the dispatcher reads.
#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(config: &BotConfig, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/bot{}", config.api_url.trim_end_matches('/'), token),
        }
    }

    /// Long-polls for new updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, DeliveryError> {
        self.call(
            GET_UPDATES_URL,
            json!({ "offset": offset, "timeout": timeout_secs, "allowed_updates": ["message"] }),
        )
        .await
    }

    /// Delivers a text message to a chat identity.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        let _: serde_json::Value = self.call(SEND_MESSAGE_URL, json!({ "chat_id": chat_id, "text": text })).await?;
        Ok(())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: serde_json::Value) -> Result<T, DeliveryError> {
        let res = self.client.post(format!("{}/{}", self.base_url, method)).json(&body).send().await?;
        let envelope: ApiResponse<T> = res.json().await?;

        if !envelope.ok {
            return Err(DeliveryError::Api(envelope.description.unwrap_or_else(|| "unknown error".to_string())));
        }
        envelope.result.ok_or_else(|| DeliveryError::Api("empty result".to_string()))
    }
}

impl Delivery for TelegramClient {
    async fn deliver(&self, user_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.send_message(user_id, text).await
    }
}
