//! Error types for the monitor layer.

use thiserror::Error;

use crate::notify::Subscription;

/// A change handler failed.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler of `subscription` could not process a change.
    #[error("Handler {subscription} failed: {reason}")]
    Handler {
        /// Entry whose handler failed.
        subscription: Subscription,
        /// What went wrong.
        reason: String,
    },
}

impl DispatchError {
    /// Creates a handler failure for `subscription`.
    #[must_use]
    pub fn handler(subscription: Subscription, reason: impl Into<String>) -> Self {
        Self::Handler {
            subscription,
            reason: reason.into(),
        }
    }
}

/// Error type for monitor operations.
///
/// Ends the polling loop; it is not restarted.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A change could not be dispatched.
    #[error("Failed to dispatch device change: {0}")]
    Dispatch(#[from] DispatchError),
}
