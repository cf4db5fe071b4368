//! Per-poll snapshot of online devices.

use std::collections::BTreeSet;

use super::{AliasTable, DeviceRecord, RawDevice};

/// Set of device ids.
pub type DeviceIds = BTreeSet<String>;

/// Immutable snapshot of the devices seen by one poll.
///
/// # Equality
///
/// Two sets are equal when their records are equal in order. A device
/// whose attributes change makes the sets unequal even though its id
/// persists.
#[derive(Debug, Clone, Default)]
pub struct DeviceSet {
    records: Vec<DeviceRecord>,
    ids: DeviceIds,
}

impl DeviceSet {
    /// Builds a set from canonical records.
    ///
    /// Ids are unique within a snapshot: a record repeating an earlier id
    /// is dropped.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = DeviceRecord>) -> Self {
        let mut ids = DeviceIds::new();
        let mut kept = Vec::new();

        for record in records {
            if ids.insert(record.id.clone()) {
                kept.push(record);
            } else {
                tracing::warn!(id = %record.id, "Duplicate device id in poll result, ignoring");
            }
        }

        Self { records: kept, ids }
    }

    /// Builds a set from raw router entries, resolving aliases.
    #[must_use]
    pub fn from_raw(devices: impl IntoIterator<Item = RawDevice>, aliases: &AliasTable) -> Self {
        Self::new(
            devices
                .into_iter()
                .map(|raw| DeviceRecord::from_raw(raw, aliases)),
        )
    }

    /// Returns the records of this snapshot.
    ///
    /// With `Some(mask)`, only records whose id is outside `mask` are
    /// returned; this is how the changed subset is extracted.
    #[must_use]
    pub fn entries(&self, mask: Option<&DeviceIds>) -> Vec<&DeviceRecord> {
        match mask {
            None => self.records.iter().collect(),
            Some(mask) => self
                .records
                .iter()
                .filter(|r| !mask.contains(&r.id))
                .collect(),
        }
    }

    /// Returns all records in poll order.
    #[must_use]
    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    /// Returns the ids of every device in this snapshot.
    #[must_use]
    pub const fn ids(&self) -> &DeviceIds {
        &self.ids
    }

    /// Number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no device is online.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PartialEq for DeviceSet {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;
