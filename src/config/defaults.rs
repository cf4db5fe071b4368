//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default router address.
pub const ROUTER_ADDRESS: &str = "192.168.1.1";

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 3;

/// Application directory name under the user data directory.
pub const APP_DIR: &str = "lanwatch";

/// Default state file name.
pub const STATE_FILE_NAME: &str = "subscriptions.json";

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// Default state file path: `<data dir>/lanwatch/subscriptions.json`.
///
/// Falls back to the working directory when the platform has no data
/// directory.
#[must_use]
pub fn state_file() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(STATE_FILE_NAME),
        |dir| dir.join(APP_DIR).join(STATE_FILE_NAME),
    )
}
