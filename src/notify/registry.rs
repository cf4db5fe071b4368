//! In-memory subscription registry.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexSet;

/// Chat identity of a subscriber.
pub type ChatId = i64;

/// Identity of a change handler.
///
/// Each variant corresponds to one notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerId {
    /// Reports devices going online or offline.
    DeviceChanges,
}

impl HandlerId {
    /// Every known handler.
    pub const ALL: [Self; 1] = [Self::DeviceChanges];

    /// Name of the notification kind this handler serves.
    ///
    /// Used as the key in the persistent subscription store.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::DeviceChanges => "devices",
        }
    }

    /// Looks up the handler serving a notification kind.
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.kind() == kind)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// One registered interest: a handler plus the arguments it is invoked with.
///
/// Two subscriptions are the same entry when handler and arguments match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    /// Handler to invoke on change.
    pub handler: HandlerId,
    /// Chat the handler reports to.
    pub chat_id: ChatId,
}

impl Subscription {
    /// Creates a device change subscription for `chat_id`.
    #[must_use]
    pub const fn device_changes(chat_id: ChatId) -> Self {
        Self {
            handler: HandlerId::DeviceChanges,
            chat_id,
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.handler, self.chat_id)
    }
}

/// Shared registry of subscriptions, iterated in registration order.
///
/// Cloning shares the underlying storage. The lock is only held for the
/// duration of a single operation and never across an `.await`, so a
/// register or unregister is atomic with respect to a dispatch cycle.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Arc<RwLock<IndexSet<Subscription>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a read-only view for the polling loop.
    #[must_use]
    pub fn reader(&self) -> RegistryReader {
        RegistryReader {
            registry: self.clone(),
        }
    }

    /// Returns a mutating view for the command dispatcher.
    #[must_use]
    pub fn writer(&self) -> RegistryWriter {
        RegistryWriter {
            registry: self.clone(),
        }
    }

    fn list(&self) -> Vec<Subscription> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn contains(&self, subscription: &Subscription) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(subscription)
    }
}

/// Read-only registry view.
#[derive(Debug, Clone)]
pub struct RegistryReader {
    registry: Registry,
}

impl RegistryReader {
    /// Returns a snapshot of all entries in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Subscription> {
        self.registry.list()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `subscription` is registered.
    #[must_use]
    pub fn contains(&self, subscription: &Subscription) -> bool {
        self.registry.contains(subscription)
    }
}

/// Mutating registry view.
#[derive(Debug, Clone)]
pub struct RegistryWriter {
    registry: Registry,
}

impl RegistryWriter {
    /// Adds `subscription`; no-op if already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn register(&self, subscription: Subscription) -> bool {
        let added = self
            .registry
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(subscription);
        tracing::debug!(%subscription, added, "Register subscription");
        added
    }

    /// Removes `subscription`; no-op if absent.
    ///
    /// Remaining entries keep their relative order. Returns `true` if the
    /// entry was removed.
    pub fn unregister(&self, subscription: &Subscription) -> bool {
        let removed = self
            .registry
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(subscription);
        tracing::debug!(%subscription, removed, "Unregister subscription");
        removed
    }

    /// Returns a snapshot of all entries in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Subscription> {
        self.registry.list()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
