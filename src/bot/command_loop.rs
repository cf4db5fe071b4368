//! Long-poll loop receiving and answering chat commands.

use std::sync::Arc;
use std::time::Duration;

use super::{ChatTransport, CommandDispatcher};
use crate::device::DeviceSource;
use crate::state::SubscriptionStore;
use crate::time::{Sleeper, TokioSleeper};

/// Long-poll timeout for command fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Pause after a failed fetch before trying again.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Receives commands, dispatches them and sends the replies.
///
/// Commands are processed one at a time in offset order. The offset moves
/// past each command once its reply has been attempted, whether or not
/// delivery succeeded.
pub struct CommandLoop<T, S, St, Sl = TokioSleeper> {
    transport: Arc<T>,
    dispatcher: CommandDispatcher<S, St>,
    sleeper: Sl,
    offset: Option<i64>,
    timeout: Duration,
}

impl<T, S, St> CommandLoop<T, S, St, TokioSleeper>
where
    T: ChatTransport,
    S: DeviceSource,
    St: SubscriptionStore,
{
    /// Creates a loop starting from the oldest pending command.
    #[must_use]
    pub const fn new(transport: Arc<T>, dispatcher: CommandDispatcher<S, St>) -> Self {
        Self {
            transport,
            dispatcher,
            sleeper: TokioSleeper,
            offset: None,
            timeout: FETCH_TIMEOUT,
        }
    }
}

impl<T, S, St, Sl> CommandLoop<T, S, St, Sl>
where
    T: ChatTransport,
    S: DeviceSource,
    St: SubscriptionStore,
    Sl: Sleeper,
{
    /// Replaces the sleeper used after a failed fetch.
    #[must_use]
    pub fn with_sleeper<N: Sleeper>(self, sleeper: N) -> CommandLoop<T, S, St, N> {
        CommandLoop {
            transport: self.transport,
            dispatcher: self.dispatcher,
            sleeper,
            offset: self.offset,
            timeout: self.timeout,
        }
    }

    /// Overrides the long-poll timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Offset the next fetch will request.
    #[must_use]
    pub const fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetches one batch and answers every command in it.
    ///
    /// Returns the number of commands processed.
    pub async fn step(&mut self) -> usize {
        let batch = self.transport.fetch_commands(self.offset, self.timeout).await;
        if !batch.available {
            self.sleeper.sleep(RETRY_DELAY).await;
            return 0;
        }

        let count = batch.commands.len();
        for command in batch.commands {
            tracing::debug!(user = %command.user_name, "<< IN message:\n{}", command.value);

            let reply = self.dispatcher.handle(&command).await;
            if !self.transport.send(command.user_id, &reply).await {
                tracing::error!(
                    user = %command.user_name,
                    offset = command.offset,
                    "Failed to deliver command reply"
                );
            }
            self.offset = Some(command.offset + 1);

            tracing::debug!(user = %command.user_name, ">> OUT message:\n{reply}");
        }

        if let Some(next) = batch.next_offset {
            if self.offset.is_none_or(|current| next > current) {
                self.offset = Some(next);
            }
        }

        count
    }

    /// Runs forever.
    pub async fn run(mut self) {
        tracing::info!("Command loop started");
        loop {
            self.step().await;
        }
    }
}

#[cfg(test)]
#[path = "command_loop_tests.rs"]
mod tests;
