//! Reply text rendering.

use std::fmt::Write;

use crate::device::{DeviceRecord, DeviceSet};
use crate::monitor::DeviceDiff;

/// Renders the device list reply: one `"N. <name>"` line per device.
#[must_use]
pub fn device_list(devices: &DeviceSet) -> String {
    let mut out = String::new();
    for (n, record) in devices.records().iter().enumerate() {
        let _ = writeln!(out, "{}. {}", n + 1, record.display_name());
    }
    out
}

/// Renders a change notification.
///
/// Arrivals come first as `"<< <name> (online)"`, then departures as
/// `">> <name> (offline)"`. An empty diff renders as an empty string.
#[must_use]
pub fn changes(change: &DeviceDiff) -> String {
    let mut out = String::new();
    push_marked(&mut out, &change.online, "<<", "online");
    push_marked(&mut out, &change.offline, ">>", "offline");
    out
}

fn push_marked(out: &mut String, records: &[DeviceRecord], marker: &str, state: &str) {
    for record in records {
        let _ = writeln!(out, "{marker} {} ({state})", record.display_name());
    }
}
