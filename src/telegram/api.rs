//! Telegram Bot API wire types.

use std::time::{Duration, SystemTime};

use serde::Deserialize;

use crate::bot::Command;

/// Telegram Bot API base URL.
pub const API_BASE: &str = "https://api.telegram.org/bot";

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Payload, present when `ok`.
    pub result: Option<T>,
    /// Error description, present when not `ok`.
    pub description: Option<String>,
}

/// A single update from getUpdates.
#[derive(Debug, Deserialize)]
pub struct Update {
    /// Monotonic update id, used as the command offset.
    pub update_id: i64,
    /// Message payload; absent for update kinds this bot does not ask for.
    pub message: Option<Message>,
}

/// An incoming message.
#[derive(Debug, Deserialize)]
pub struct Message {
    /// Sender; absent for channel posts.
    pub from: Option<User>,
    /// Chat the message was sent in.
    pub chat: Chat,
    /// Send time, Unix seconds.
    pub date: u64,
    /// Message text; absent for media messages.
    pub text: Option<String>,
}

/// Message sender.
#[derive(Debug, Deserialize)]
pub struct User {
    /// Sender id; also the id of the private chat with the bot.
    pub id: i64,
    /// Whether the sender is a bot.
    pub is_bot: bool,
    /// First name, used as the display name.
    pub first_name: String,
    /// IETF language tag.
    pub language_code: Option<String>,
}

/// Chat info.
#[derive(Debug, Deserialize)]
pub struct Chat {
    /// Chat id.
    pub id: i64,
    /// Chat scope.
    #[serde(rename = "type")]
    pub chat_type: String,
}

impl Update {
    /// Converts the update into a command.
    ///
    /// Returns `None` for updates without a text message from a user.
    #[must_use]
    pub fn into_command(self) -> Option<Command> {
        let message = self.message?;
        let from = message.from?;
        let text = message.text?;

        Some(
            Command::new(self.update_id, from.id, from.first_name, &text)
                .with_bot(from.is_bot)
                .with_language(from.language_code)
                .with_chat_type(message.chat.chat_type)
                .with_date(SystemTime::UNIX_EPOCH + Duration::from_secs(message.date)),
        )
    }
}
