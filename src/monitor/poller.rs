//! Polling loop driving change detection and dispatch.
//!
//! [`PollingLoop`] takes a router snapshot at a fixed cadence, compares it
//! with the previous one and hands every detected change to the registered
//! subscriptions.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::change::{DeviceDiff, diff};
use super::error::{DispatchError, MonitorError};
use crate::device::{DeviceScanner, DeviceSet, DeviceSource};
use crate::notify::{RegistryReader, Subscription};
use crate::time::{Sleeper, TokioSleeper};

/// Processes one device change for one subscription.
///
/// Implementations receive every registry entry in registration order and
/// are awaited one after another.
pub trait ChangeHandler: Send + Sync {
    /// Handles `change` on behalf of `subscription`.
    ///
    /// # Errors
    ///
    /// An error aborts the remaining handlers of the cycle and ends the
    /// polling loop.
    fn handle(
        &self,
        subscription: &Subscription,
        change: &DeviceDiff,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// What a single poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The router gave no data; the previous snapshot is kept.
    Unavailable,
    /// The snapshot equals the previous one.
    Unchanged,
    /// A change was dispatched to `notified` subscriptions.
    Changed {
        /// Number of handlers invoked.
        notified: usize,
    },
}

/// Periodic router poller.
///
/// # Type Parameters
///
/// * `S` - The [`DeviceSource`] behind the shared scanner
/// * `H` - The [`ChangeHandler`] invoked per subscription
/// * `Sl` - The [`Sleeper`] used between polls (defaults to [`TokioSleeper`])
pub struct PollingLoop<S, H, Sl = TokioSleeper> {
    scanner: Arc<DeviceScanner<S>>,
    registry: RegistryReader,
    handler: H,
    sleeper: Sl,
    interval: Duration,
    previous: Option<DeviceSet>,
}

impl<S, H> PollingLoop<S, H, TokioSleeper>
where
    S: DeviceSource,
    H: ChangeHandler,
{
    /// Creates a polling loop waiting `interval` between polls.
    #[must_use]
    pub const fn new(
        scanner: Arc<DeviceScanner<S>>,
        registry: RegistryReader,
        handler: H,
        interval: Duration,
    ) -> Self {
        Self {
            scanner,
            registry,
            handler,
            sleeper: TokioSleeper,
            interval,
            previous: None,
        }
    }
}

impl<S, H, Sl> PollingLoop<S, H, Sl>
where
    S: DeviceSource,
    H: ChangeHandler,
    Sl: Sleeper,
{
    /// Replaces the sleeper used between polls.
    ///
    /// Tests use this to run cycles without waiting.
    #[must_use]
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> PollingLoop<S, H, T> {
        PollingLoop {
            scanner: self.scanner,
            registry: self.registry,
            handler: self.handler,
            sleeper,
            interval: self.interval,
            previous: self.previous,
        }
    }

    /// Returns the delay between polls.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the snapshot changes are compared against.
    #[must_use]
    pub const fn previous(&self) -> Option<&DeviceSet> {
        self.previous.as_ref()
    }

    /// Returns the change handler.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Takes the initial snapshot.
    ///
    /// Failure is not fatal: the loop starts without a previous snapshot
    /// and the first successful poll reports every device as online.
    pub async fn init(&mut self) {
        self.previous = self.scanner.snapshot().await;
        match &self.previous {
            Some(set) => tracing::info!(online = set.len(), "Initial device snapshot taken"),
            None => tracing::warn!("Initial device snapshot unavailable"),
        }
    }

    /// Runs one poll cycle without waiting.
    ///
    /// # Errors
    ///
    /// Returns the first handler error. The snapshot of a failed cycle does
    /// not become the previous one.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, DispatchError> {
        let Some(current) = self.scanner.snapshot().await else {
            tracing::error!("Device snapshot unavailable, keeping previous");
            return Ok(PollOutcome::Unavailable);
        };

        let Some(change) = diff(self.previous.as_ref(), &current) else {
            return Ok(PollOutcome::Unchanged);
        };

        tracing::info!(
            online = change.online.len(),
            offline = change.offline.len(),
            "Device change detected"
        );

        let subscriptions = self.registry.list();
        for subscription in &subscriptions {
            tracing::debug!(%subscription, "Dispatching device change");
            self.handler.handle(subscription, &change).await?;
        }

        self.previous = Some(current);
        Ok(PollOutcome::Changed {
            notified: subscriptions.len(),
        })
    }

    /// Runs the loop until a handler fails.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Dispatch`] when a handler fails. The loop is
    /// not restarted.
    pub async fn run(mut self) -> Result<(), MonitorError> {
        self.init().await;
        loop {
            self.sleeper.sleep(self.interval).await;
            self.poll_once().await?;
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
