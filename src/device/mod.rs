//! Device layer for fetching and representing online devices.
//!
//! This module provides:
//! - Raw router entries and their canonical form ([`RawDevice`], [`DeviceRecord`])
//! - The per-poll snapshot ([`DeviceSet`])
//! - The static alias table ([`AliasTable`])
//! - The router abstraction and scanner ([`DeviceSource`], [`DeviceScanner`])

mod alias;
mod record;
mod set;
mod source;

pub use alias::{AliasError, AliasTable};
pub use record::{DeviceRecord, RawDevice, RawModel};
pub use set::{DeviceIds, DeviceSet};
pub use source::{DeviceScanner, DeviceSource, FetchError};

#[cfg(test)]
pub use source::mock;
