//! Device change detection.

use crate::device::{DeviceIds, DeviceRecord, DeviceSet};

/// Devices that appeared and disappeared between two polls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceDiff {
    /// Devices of the current poll that were not in the previous one.
    pub online: Vec<DeviceRecord>,
    /// Devices of the previous poll that are not in the current one.
    pub offline: Vec<DeviceRecord>,
    /// Ids present in both polls.
    pub persisting: DeviceIds,
}

impl DeviceDiff {
    /// Returns true if no device came or went.
    ///
    /// A diff can be empty while the snapshots differ, when only
    /// attributes of persisting devices changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.online.is_empty() && self.offline.is_empty()
    }
}

/// Compares two snapshots.
///
/// Returns `None` when the snapshots are equal, in which case nothing
/// should be dispatched. Otherwise devices are split by id: records of
/// `current` outside the shared ids are online, records of `previous`
/// outside them are offline. Attribute changes of a persisting device
/// are not reported.
///
/// # Arguments
///
/// * `previous` - Snapshot of the previous poll; `None` is treated as empty
/// * `current` - Snapshot of this poll
#[must_use]
pub fn diff(previous: Option<&DeviceSet>, current: &DeviceSet) -> Option<DeviceDiff> {
    let empty = DeviceSet::default();
    let previous = previous.unwrap_or(&empty);

    if previous == current {
        return None;
    }

    let persisting: DeviceIds = previous
        .ids()
        .intersection(current.ids())
        .cloned()
        .collect();

    Some(DeviceDiff {
        online: current.entries(Some(&persisting)).into_iter().cloned().collect(),
        offline: previous.entries(Some(&persisting)).into_iter().cloned().collect(),
        persisting,
    })
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
