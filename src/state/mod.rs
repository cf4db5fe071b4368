//! Subscription persistence for restoring subscribers across restarts.
//!
//! This module provides abstractions for storing and retrieving which chat
//! users are subscribed to which notification kind.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileSubscriptionStore;

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notify::ChatId;

/// A stored subscriber.
///
/// The display name is kept so that replay at startup can apply the same
/// access check as live commands. Entries stored as a bare chat id load
/// with an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSubscriber")]
pub struct Subscriber {
    /// Chat identity notifications are delivered to.
    pub id: ChatId,
    /// Display name the subscriber had when subscribing.
    pub name: String,
}

impl Subscriber {
    /// Creates a subscriber record.
    #[must_use]
    pub fn new(id: ChatId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// On-disk forms of a subscriber entry.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSubscriber {
    Id(ChatId),
    Full {
        id: ChatId,
        #[serde(default)]
        name: String,
    },
}

impl From<StoredSubscriber> for Subscriber {
    fn from(stored: StoredSubscriber) -> Self {
        match stored {
            StoredSubscriber::Id(id) => Self::new(id, String::new()),
            StoredSubscriber::Full { id, name } => Self { id, name },
        }
    }
}

/// Persisted record of one notification kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindRecord {
    /// Command that created the record.
    pub cmd: String,
    /// Subscribers, unique by id, in subscription order.
    pub list: Vec<Subscriber>,
}

/// Whole persisted state: one record per notification kind.
pub type SubscriptionState = BTreeMap<String, KindRecord>;

/// Subscriptions of one kind as returned by [`SubscriptionStore::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredKind {
    /// Issuing command, `None` if the kind was never populated.
    pub command: Option<String>,
    /// Stored subscribers.
    pub subscribers: Vec<Subscriber>,
}

impl StoredKind {
    /// Returns true if nobody is stored for this kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

/// Result of reading the state file.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - Successfully loaded previous state
/// - No previous state exists (first run)
/// - State exists but is corrupted/unreadable
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// Successfully loaded previously saved state.
    Loaded(SubscriptionState),

    /// No state file exists (first run or explicitly deleted).
    NotFound,

    /// State file exists but could not be parsed.
    /// The store starts empty and overwrites the file on the next write.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded state, or an empty state for `NotFound`/`Corrupted`.
    #[must_use]
    pub fn into_state(self) -> SubscriptionState {
        match self {
            Self::Loaded(state) => state,
            Self::NotFound | Self::Corrupted { .. } => SubscriptionState::new(),
        }
    }

    /// Returns `true` if state was successfully loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Errors that can occur while writing subscription state.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants.
#[derive(Debug, Error)]
pub enum StateError {
    /// Failed to write the state file.
    #[error("Failed to write state file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize state to JSON.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blocking write task did not complete.
    #[error("State write task failed: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Durable mapping from notification kind to subscribers.
///
/// Every mutation rewrites the whole state before returning. Mutations
/// that change nothing do not touch the backing storage.
pub trait SubscriptionStore: Send + Sync {
    /// Returns the stored subscriptions of `kind`.
    ///
    /// A kind that was never populated yields `StoredKind::default()`.
    fn load(&self, kind: &str) -> StoredKind;

    /// Returns every kind with a stored record.
    fn kinds(&self) -> Vec<String>;

    /// Adds `subscriber` to `kind`, creating the record with `command`
    /// if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn add(
        &self,
        kind: &str,
        command: &str,
        subscriber: &Subscriber,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;

    /// Removes the subscriber with `subscriber_id` from `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn remove(
        &self,
        kind: &str,
        subscriber_id: ChatId,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}

/// Applies an add to in-memory state. Returns `true` if anything changed.
fn apply_add(
    state: &mut SubscriptionState,
    kind: &str,
    command: &str,
    subscriber: &Subscriber,
) -> bool {
    let mut changed = false;
    let record = state.entry(kind.to_string()).or_insert_with(|| {
        changed = true;
        KindRecord {
            cmd: command.to_string(),
            list: Vec::new(),
        }
    });

    match record.list.iter_mut().find(|s| s.id == subscriber.id) {
        Some(existing) if existing.name != subscriber.name => {
            existing.name.clone_from(&subscriber.name);
            true
        }
        Some(_) => changed,
        None => {
            record.list.push(subscriber.clone());
            true
        }
    }
}

/// Applies a remove to in-memory state. Returns `true` if anything changed.
fn apply_remove(state: &mut SubscriptionState, kind: &str, subscriber_id: ChatId) -> bool {
    let Some(record) = state.get_mut(kind) else {
        return false;
    };
    let before = record.list.len();
    record.list.retain(|s| s.id != subscriber_id);
    record.list.len() != before
}

fn stored_kind(state: &SubscriptionState, kind: &str) -> StoredKind {
    state
        .get(kind)
        .map(|record| StoredKind {
            command: Some(record.cmd.clone()),
            subscribers: record.list.clone(),
        })
        .unwrap_or_default()
}
