//! Persisted state snapshot written after every apply run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::EntryGraph;

/// Current state-file format version.
pub const STATE_FORMAT_VERSION: u32 = 1;

/// The durable snapshot: `{ version, lastUpdate, state }`.
///
/// `lastUpdate` serializes as an RFC 3339 timestamp. Files written before the
/// version field existed load as version 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(rename = "lastUpdate")]
    pub last_update: DateTime<Utc>,

    pub state: EntryGraph,
}

fn default_version() -> u32 {
    STATE_FORMAT_VERSION
}

impl PersistedState {
    /// Snapshot a graph at the current instant.
    pub fn new(state: EntryGraph) -> Self {
        Self {
            version: STATE_FORMAT_VERSION,
            last_update: Utc::now(),
            state,
        }
    }

    /// Validate the snapshot format.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.version != STATE_FORMAT_VERSION {
            anyhow::bail!("Unsupported state file version: {}", self.version);
        }
        Ok(())
    }
}
