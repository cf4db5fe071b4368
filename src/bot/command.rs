//! Inbound chat commands.

use std::time::SystemTime;

use crate::notify::ChatId;

/// One command received from the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Ordering offset assigned by the chat service.
    pub offset: i64,
    /// Sender identity; replies and notifications go here.
    pub user_id: ChatId,
    /// Sender display name, matched against the access list.
    pub user_name: String,
    /// Whether the sender is a bot.
    pub is_bot: bool,
    /// Sender language code, if reported.
    pub language: Option<String>,
    /// Chat scope ("private", "group", ...).
    pub chat_type: String,
    /// When the message was sent.
    pub date: SystemTime,
    /// Normalized command text used as the dispatch key.
    pub value: String,
}

impl Command {
    /// Creates a private-chat command from a human sender.
    ///
    /// `text` is normalized with [`Command::normalize`].
    #[must_use]
    pub fn new(offset: i64, user_id: ChatId, user_name: impl Into<String>, text: &str) -> Self {
        Self {
            offset,
            user_id,
            user_name: user_name.into(),
            is_bot: false,
            language: None,
            chat_type: "private".to_string(),
            date: SystemTime::UNIX_EPOCH,
            value: Self::normalize(text),
        }
    }

    /// Sets the chat scope.
    #[must_use]
    pub fn with_chat_type(mut self, chat_type: impl Into<String>) -> Self {
        self.chat_type = chat_type.into();
        self
    }

    /// Sets the sender language.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Marks the sender as a bot or not.
    #[must_use]
    pub const fn with_bot(mut self, is_bot: bool) -> Self {
        self.is_bot = is_bot;
        self
    }

    /// Sets the send time.
    #[must_use]
    pub const fn with_date(mut self, date: SystemTime) -> Self {
        self.date = date;
        self
    }

    /// Normalizes raw message text into a dispatch key.
    #[must_use]
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }
}
