//! Telegram Bot API transport for the chat bot.
//!
//! This module provides:
//! - Bot API wire types ([`Update`], [`Message`], [`User`], [`Chat`])
//! - The client implementing [`crate::bot::ChatTransport`] ([`TelegramClient`])
//! - Error handling ([`TelegramError`])

mod api;
mod client;
mod error;

pub use api::{API_BASE, ApiResponse, Chat, Message, Update, User};
pub use client::TelegramClient;
pub use error::TelegramError;
