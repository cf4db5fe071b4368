//! Raw router device entries and their canonical projection.

use serde::{Deserialize, Serialize};

use super::AliasTable;

/// Model block of a raw router device entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModel {
    /// Device type reported by the router (e.g. "Computer", "Mobile").
    pub device_type: String,
    /// Manufacturer, when the router could identify one.
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// A device entry as returned by the router's device list.
///
/// Only the fields this crate reads are modelled; everything else in the
/// router's payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    /// Router-assigned identifier, stable across polls.
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// Model information.
    pub model: RawModel,
    /// Friendly name, if known.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Raw connection list, kept opaque.
    #[serde(default)]
    pub connections: Option<serde_json::Value>,
}

impl RawDevice {
    /// Returns the MAC address of the device's first connection.
    ///
    /// This is the address matched against the router's list of live
    /// connections when deciding whether the device is online.
    #[must_use]
    pub fn primary_mac(&self) -> Option<&str> {
        self.connections
            .as_ref()?
            .as_array()?
            .first()?
            .get("macAddress")?
            .as_str()
    }
}

/// Canonical form of one online device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Unique device identifier.
    pub id: String,
    /// Device type string.
    pub device: String,
    /// Manufacturer.
    pub devtype: Option<String>,
    /// Friendly name.
    pub name: Option<String>,
    /// Raw connection info.
    pub net: Option<serde_json::Value>,
    /// Human-assigned alias from the alias table.
    pub kname: Option<String>,
}

impl DeviceRecord {
    /// Projects a raw router entry into its canonical form.
    #[must_use]
    pub fn from_raw(raw: RawDevice, aliases: &AliasTable) -> Self {
        let kname = aliases.get(&raw.device_id).map(ToString::to_string);
        Self {
            id: raw.device_id,
            device: raw.model.device_type,
            devtype: raw.model.manufacturer,
            name: raw.friendly_name,
            net: raw.connections,
            kname,
        }
    }

    /// Name shown to chat users.
    ///
    /// Alias first, then `"<device>: <manufacturer>"`, then the friendly
    /// name, then the bare id.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(alias) = self.kname.as_deref().filter(|a| !a.is_empty()) {
            return alias.to_string();
        }
        if let Some(vendor) = self.devtype.as_deref().filter(|v| !v.is_empty()) {
            return format!("{}: {vendor}", self.device);
        }
        self.name.clone().unwrap_or_else(|| self.id.clone())
    }
}
