//! Telegram Bot API client.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use super::TelegramError;
use super::api::{API_BASE, ApiResponse, Update};
use crate::bot::{ChatTransport, CommandBatch};
use crate::notify::ChatId;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// Client for the two Bot API methods the bot needs.
///
/// The token is part of every request URL and is never logged.
#[derive(Debug, Clone)]
pub struct TelegramClient<H> {
    client: H,
    base: Url,
}

impl<H: HttpClient> TelegramClient<H> {
    /// Creates a client for the bot identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::InvalidToken`] if the token cannot be
    /// embedded in the API URL.
    pub fn new(client: H, token: &str) -> Result<Self, TelegramError> {
        let base = Url::parse(&format!("{API_BASE}{token}/")).map_err(TelegramError::InvalidToken)?;
        Ok(Self { client, base })
    }

    /// Creates a client against an arbitrary API root (ending in `/`).
    #[must_use]
    pub const fn with_base_url(client: H, base: Url) -> Self {
        Self { client, base }
    }

    fn method_url(&self, method: &str) -> Result<Url, TelegramError> {
        self.base.join(method).map_err(TelegramError::InvalidToken)
    }

    /// Long-polls `getUpdates` for new messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let mut url = self.method_url("getUpdates")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("timeout", &timeout.as_secs().to_string());
            if let Some(offset) = offset {
                query.append_pair("offset", &offset.to_string());
            }
            query.append_pair("allowed_updates", r#"["message"]"#);
        }

        let response = self.client.request(HttpRequest::get(url)).await?;
        decode(&response)
    }

    /// Sends a plain-text message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        let url = self.method_url("sendMessage")?;
        let body = serde_json::json!({ "chat_id": chat_id, "text": text });

        let response = self
            .client
            .request(HttpRequest::post(url).with_json(&body))
            .await?;
        decode::<serde_json::Value>(&response).map(|_| ())
    }
}

/// Unwraps the Bot API envelope.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, TelegramError> {
    let envelope: ApiResponse<T> = match serde_json::from_slice(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if !response.is_success() => {
            return Err(TelegramError::Status {
                status: response.status,
            });
        }
        Err(e) => return Err(TelegramError::Decode(e)),
    };

    match envelope {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse { description, .. } => Err(TelegramError::Api {
            description: description.unwrap_or_else(|| format!("HTTP {}", response.status)),
        }),
    }
}

impl<H: HttpClient> ChatTransport for TelegramClient<H> {
    async fn fetch_commands(&self, offset: Option<i64>, timeout: Duration) -> CommandBatch {
        let updates = match self.get_updates(offset, timeout).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("Failed to fetch Telegram updates: {e}");
                return CommandBatch::unavailable();
            }
        };

        let next_offset = updates.iter().map(|u| u.update_id + 1).max();
        let commands = updates
            .into_iter()
            .filter_map(|update| {
                let id = update.update_id;
                let command = update.into_command();
                if command.is_none() {
                    tracing::debug!(update_id = id, "Skipping update without text command");
                }
                command
            })
            .collect();

        CommandBatch::new(commands, next_offset)
    }

    async fn send(&self, chat_id: ChatId, text: &str) -> bool {
        match self.send_message(chat_id, text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(chat_id, "Failed to send Telegram message: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
