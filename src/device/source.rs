//! Device source trait, fetch errors and the online-device scanner.

use std::collections::HashSet;
use std::future::Future;

use thiserror::Error;

use super::{AliasTable, DeviceSet, RawDevice};
use crate::transport::HttpError;

/// Error type for device source operations.
///
/// Never escapes the scanner: every variant is logged and turned into an
/// absent snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP exchange with the router failed.
    #[error("Router request failed: {0}")]
    Http(#[from] HttpError),

    /// The router answered with a non-success HTTP status.
    #[error("Router returned HTTP {status}")]
    Status {
        /// The HTTP status code
        status: http::StatusCode,
    },

    /// The router answered with an unexpected result code.
    #[error("Bad response: {result}")]
    Rejected {
        /// The result code reported by the router
        result: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode router response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Abstraction over the router's device-presence API.
///
/// # Design
///
/// The two queries mirror what home routers typically expose: the list
/// of every device the router has ever seen and the MAC addresses that
/// currently hold a connection. Combining them is the scanner's job.
pub trait DeviceSource: Send + Sync {
    /// Fetches every device registered with the router.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the router cannot be reached or answers
    /// with an unexpected payload.
    fn registered_devices(&self)
    -> impl Future<Output = Result<Vec<RawDevice>, FetchError>> + Send;

    /// Fetches the MAC addresses of currently connected devices.
    ///
    /// # Errors
    ///
    /// Same as [`DeviceSource::registered_devices`].
    fn connected_macs(&self) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;
}

/// Builds [`DeviceSet`] snapshots of the devices currently online.
///
/// Shared by the polling loop and the device-list command.
#[derive(Debug)]
pub struct DeviceScanner<S> {
    source: S,
    aliases: AliasTable,
}

impl<S: DeviceSource> DeviceScanner<S> {
    /// Creates a scanner over `source`, naming devices with `aliases`.
    #[must_use]
    pub const fn new(source: S, aliases: AliasTable) -> Self {
        Self { source, aliases }
    }

    /// Returns the underlying device source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Takes a snapshot of the devices currently online.
    ///
    /// Returns `None` when either router query fails or comes back empty.
    /// Failures are logged here; callers only see "no data".
    pub async fn snapshot(&self) -> Option<DeviceSet> {
        let devices = match self.source.registered_devices().await {
            Ok(devices) if !devices.is_empty() => devices,
            Ok(_) => {
                tracing::debug!("Router reported no registered devices");
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to fetch registered devices: {e}");
                return None;
            }
        };

        let online: HashSet<String> = match self.source.connected_macs().await {
            Ok(macs) if !macs.is_empty() => macs.into_iter().collect(),
            Ok(_) => {
                tracing::debug!("Router reported no connected devices");
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to fetch network connections: {e}");
                return None;
            }
        };

        let set = DeviceSet::from_raw(
            devices
                .into_iter()
                .filter(|d| d.primary_mac().is_some_and(|mac| online.contains(mac))),
            &self.aliases,
        );
        tracing::debug!(online = set.len(), "Device snapshot taken");
        Some(set)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{ScriptedSource, online, raw_device};
    use super::*;

    fn ids(set: &DeviceSet) -> Vec<&str> {
        set.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn snapshot_keeps_only_connected_devices() {
        let devices = vec![raw_device("a", "m1"), raw_device("b", "m2")];
        let source = ScriptedSource::new(vec![Some((devices, vec!["m2".to_string()]))]);
        let scanner = DeviceScanner::new(source, AliasTable::new());

        let set = scanner.snapshot().await.unwrap();

        assert_eq!(ids(&set), ["b"]);
    }

    #[tokio::test]
    async fn snapshot_is_none_when_router_fails() {
        let scanner = DeviceScanner::new(ScriptedSource::new(vec![None]), AliasTable::new());
        assert!(scanner.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn snapshot_is_none_without_registered_devices() {
        let source = ScriptedSource::new(vec![Some((vec![], vec!["m1".to_string()]))]);
        let scanner = DeviceScanner::new(source, AliasTable::new());

        assert!(scanner.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn snapshot_is_none_without_connections() {
        let source = ScriptedSource::new(vec![Some((vec![raw_device("a", "m1")], vec![]))]);
        let scanner = DeviceScanner::new(source, AliasTable::new());

        assert!(scanner.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn snapshot_skips_devices_without_connections() {
        let mut offline = raw_device("b", "m2");
        offline.connections = None;
        let source = ScriptedSource::new(vec![Some((
            vec![raw_device("a", "m1"), offline],
            vec!["m1".to_string(), "m2".to_string()],
        ))]);
        let scanner = DeviceScanner::new(source, AliasTable::new());

        let set = scanner.snapshot().await.unwrap();

        assert_eq!(ids(&set), ["a"]);
    }

    #[tokio::test]
    async fn snapshot_applies_aliases() {
        let aliases = AliasTable::from_iter([("a".to_string(), "Desk PC".to_string())]);
        let scanner = DeviceScanner::new(ScriptedSource::new(vec![Some(online(&["a"]))]), aliases);

        let set = scanner.snapshot().await.unwrap();

        assert_eq!(set.records()[0].kname.as_deref(), Some("Desk PC"));
    }

    #[test]
    fn rejected_error_displays_result_code() {
        let error = FetchError::Rejected {
            result: "_ErrorUnauthorized".to_string(),
        };
        assert_eq!(error.to_string(), "Bad response: _ErrorUnauthorized");
    }
}
