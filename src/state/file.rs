//! File-based subscription store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::notify::ChatId;

use super::{
    LoadResult, StateError, StoredKind, Subscriber, SubscriptionState, SubscriptionStore,
    apply_add, apply_remove, stored_kind,
};

/// File-based implementation of [`SubscriptionStore`].
///
/// The whole state is held in memory and written out as one JSON object
/// keyed by notification kind:
///
/// ```json
/// { "devices": { "cmd": "register", "list": [{ "id": 42, "name": "alice" }] } }
/// ```
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent corruption:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// A mutation is applied to a copy of the state and only becomes visible
/// once that copy is on disk. Mutations are serialized by `writer`.
#[derive(Debug)]
pub struct FileSubscriptionStore {
    path: PathBuf,
    state: Mutex<SubscriptionState>,
    writer: tokio::sync::Mutex<()>,
}

impl FileSubscriptionStore {
    /// Opens the store at `path`, loading any existing state.
    ///
    /// A missing or unreadable file yields an empty store; the file is
    /// (re)written on the first mutation.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let result = Self::read(&path);
        match &result {
            LoadResult::Loaded(state) => {
                tracing::debug!(path = %path.display(), kinds = state.len(), "Loaded subscription state");
            }
            LoadResult::NotFound => {
                tracing::debug!(path = %path.display(), "No subscription state, starting empty");
            }
            LoadResult::Corrupted { reason } => {
                tracing::warn!(path = %path.display(), %reason, "Subscription state unreadable, starting empty");
            }
        }

        Self {
            path,
            state: Mutex::new(result.into_state()),
            writer: tokio::sync::Mutex::new(()),
        }
    }

    /// Reads and parses the state file at `path`.
    #[must_use]
    pub fn read(path: &Path) -> LoadResult {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        match serde_json::from_str::<SubscriptionState>(&content) {
            Ok(state) => LoadResult::Loaded(state),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Invalid JSON: {e}"),
            },
        }
    }

    /// Returns the path to the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> SubscriptionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `mutate` to a copy of the state, writes the copy and then
    /// commits it. On error the in-memory state is unchanged.
    async fn mutate(
        &self,
        mutate: impl FnOnce(&mut SubscriptionState) -> bool,
    ) -> Result<(), StateError> {
        let _guard = self.writer.lock().await;

        let mut next = self.snapshot();
        if !mutate(&mut next) {
            return Ok(());
        }

        let content = serde_json::to_string_pretty(&next).map_err(StateError::Serialize)?;
        self.persist(content).await?;

        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    async fn persist(&self, content: String) -> Result<(), StateError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::write_blocking(&path, &content))
            .await
            .map_err(StateError::Task)?
    }

    /// Performs the blocking write.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn write_blocking(path: &Path, content: &str) -> Result<(), StateError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }

        // state.json -> state.json.tmp, not state.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&temp_path, content).map_err(StateError::Write)?;
        std::fs::rename(&temp_path, path).map_err(StateError::Write)?;

        tracing::debug!(path = %path.display(), "Subscription state written");
        Ok(())
    }
}

impl SubscriptionStore for FileSubscriptionStore {
    fn load(&self, kind: &str) -> StoredKind {
        stored_kind(&self.state.lock().unwrap_or_else(PoisonError::into_inner), kind)
    }

    fn kinds(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    async fn add(&self, kind: &str, command: &str, subscriber: &Subscriber) -> Result<(), StateError> {
        self.mutate(|state| apply_add(state, kind, command, subscriber))
            .await
    }

    async fn remove(&self, kind: &str, subscriber_id: ChatId) -> Result<(), StateError> {
        self.mutate(|state| apply_remove(state, kind, subscriber_id))
            .await
    }
}
