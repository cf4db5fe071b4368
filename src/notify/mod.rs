//! Subscription registry for device change notifications.
//!
//! This module provides:
//! - Subscription entries ([`Subscription`], [`HandlerId`])
//! - The shared, insertion-ordered registry ([`Registry`])
//! - Read and write views handed to the polling loop and the command
//!   dispatcher ([`RegistryReader`], [`RegistryWriter`])

mod registry;

pub use registry::{ChatId, HandlerId, Registry, RegistryReader, RegistryWriter, Subscription};
