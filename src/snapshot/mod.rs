//! Read-only snapshots of machine status.
//!
//! A snapshot mirrors what a machine looks like at one moment (state,
//! available actions, the pending transition) for display or diagnostics.
//! It carries no handlers and cannot be turned back into a running machine.

use crate::core::State;
use crate::dispatch::{Transition, TransitionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// The in-flight transition as seen at snapshot time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PendingTransition<S: State> {
    pub id: Uuid,
    pub action: String,
    pub from: S,
    pub to: S,
    pub status: TransitionStatus,
    pub paused: bool,
    /// Handlers still queued
    pub remaining: usize,
    pub started_at: DateTime<Utc>,
}

impl<S: State> PendingTransition<S> {
    pub fn from_transition(transition: &Transition<S>) -> Self {
        Self {
            id: transition.id(),
            action: transition.action().to_string(),
            from: transition.from().clone(),
            to: transition.to().clone(),
            status: transition.status(),
            paused: transition.is_paused(),
            remaining: transition.remaining(),
            started_at: transition.created_at(),
        }
    }
}

/// Serializable view of a state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub state: S,

    pub is_final: bool,

    /// Actions with an entry from `state`
    pub available_actions: Vec<String>,

    pub pending: Option<PendingTransition<S>>,
}

impl<S: State> MachineSnapshot<S> {
    pub fn new(
        state: S,
        available_actions: Vec<String>,
        pending: Option<PendingTransition<S>>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            is_final: state.is_final(),
            state,
            available_actions,
            pending,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.paused)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}
