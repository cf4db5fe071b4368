//! Monitor layer for detecting device changes.
//!
//! This module provides types and functions for:
//! - Representing a change between two polls ([`DeviceDiff`])
//! - Detecting changes between snapshots ([`diff`])
//! - Error handling ([`DispatchError`], [`MonitorError`])
//! - Periodic polling and dispatch ([`PollingLoop`], [`ChangeHandler`])

mod change;
mod error;
mod poller;

pub use change::{DeviceDiff, diff};
pub use error::{DispatchError, MonitorError};
pub use poller::{ChangeHandler, PollOutcome, PollingLoop};
