//! Chat service abstraction.

use std::future::Future;
use std::time::Duration;

use super::Command;
use crate::notify::ChatId;

/// Result of one command fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBatch {
    /// Commands in offset order.
    pub commands: Vec<Command>,
    /// Offset to request next, covering updates that carried no command.
    pub next_offset: Option<i64>,
    /// False when the fetch failed and the batch is empty for that reason.
    pub available: bool,
}

impl CommandBatch {
    /// Creates a successful batch.
    #[must_use]
    pub const fn new(commands: Vec<Command>, next_offset: Option<i64>) -> Self {
        Self {
            commands,
            next_offset,
            available: true,
        }
    }

    /// Creates the batch reported when the fetch failed.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            commands: Vec::new(),
            next_offset: None,
            available: false,
        }
    }
}

/// Two-way chat service.
///
/// Implementations log their own failures and report them as empty
/// results, so callers never see transport errors.
pub trait ChatTransport: Send + Sync {
    /// Long-polls for commands at or after `offset`.
    ///
    /// Waits up to `timeout` for new commands to arrive.
    fn fetch_commands(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> impl Future<Output = CommandBatch> + Send;

    /// Sends `text` to `chat_id`. Returns whether delivery succeeded.
    fn send(&self, chat_id: ChatId, text: &str) -> impl Future<Output = bool> + Send;
}
