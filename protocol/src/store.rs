use std::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

pub type SnapshotCallback = Box<dyn FnMut(&RawSnapshot)>;

/// Where a session's rounds are kept, and whose rounds it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    pub player: String,
}

fn default_namespace() -> String {
    "players".into()
}

impl SessionConfig {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            namespace: default_namespace(),
            player: player.into(),
        }
    }

    /// Remote path of one round, `namespace/player/index`.
    pub fn round_path(&self, round_index: usize) -> String {
        format!("{}/{}/{}", self.namespace, self.player, round_index)
    }
}

/// Remote home of the active session's rounds.
///
/// Writes are fire-and-forget from the caller's side: local state is never rolled back when they fail.
pub trait RoundStore {
    /// Upserts the round at `round_index`.
    fn write(&mut self, round_index: usize, encoded: &EncodedRound) -> Result<(), StoreError>;

    /// Removes the round at `round_index`. Removing a missing round is not an error.
    fn delete(&mut self, round_index: usize) -> Result<(), StoreError>;

    /// Calls `on_snapshot` with every player's rounds now and after each change.
    fn subscribe(&mut self, on_snapshot: SnapshotCallback);
}

/// In-process store holding every player's rounds.
pub struct MemoryStore {
    config: SessionConfig,
    snapshot: RawSnapshot,
    subscribers: Vec<SnapshotCallback>,
}

impl MemoryStore {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_snapshot(config, RawSnapshot::new())
    }

    pub fn with_snapshot(config: SessionConfig, snapshot: RawSnapshot) -> Self {
        Self {
            config,
            snapshot,
            subscribers: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &RawSnapshot {
        &self.snapshot
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.snapshot);
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl RoundStore for MemoryStore {
    fn write(&mut self, round_index: usize, encoded: &EncodedRound) -> Result<(), StoreError> {
        log::debug!("Writing {} = {encoded}", self.config.round_path(round_index));
        self.snapshot
            .set_round(&self.config.player, round_index, encoded);
        self.notify();
        Ok(())
    }

    fn delete(&mut self, round_index: usize) -> Result<(), StoreError> {
        let path = self.config.round_path(round_index);
        if self.snapshot.remove_round(&self.config.player, round_index) {
            log::debug!("Deleted {path}");
            self.notify();
        } else {
            log::debug!("Nothing stored at {path}");
        }
        Ok(())
    }

    fn subscribe(&mut self, mut on_snapshot: SnapshotCallback) {
        on_snapshot(&self.snapshot);
        self.subscribers.push(on_snapshot);
    }
}
