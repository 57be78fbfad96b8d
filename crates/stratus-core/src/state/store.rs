//! State store for loading and saving the persisted entry graph.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::graph::EntryGraph;
use crate::state::types::PersistedState;

/// Load/save of the durable state snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current graph.
    ///
    /// A missing file is the first-ever run and loads as an empty graph, so
    /// every candidate entry becomes a Create.
    pub fn load(&self) -> anyhow::Result<EntryGraph> {
        if !self.path.exists() {
            return Ok(EntryGraph::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;
        let snapshot: PersistedState = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))?;
        snapshot.validate()?;
        Ok(snapshot.state)
    }

    /// Persist a graph as the new snapshot, stamped with the current instant.
    ///
    /// Writes to a sibling temp file and renames over the target, so a crash
    /// mid-write never truncates the previous snapshot.
    pub fn save(&self, graph: &EntryGraph) -> anyhow::Result<()> {
        let snapshot = PersistedState::new(graph.clone());
        let content = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize state snapshot")?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write state file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!("Failed to move state file into place: {}", self.path.display())
        })?;
        Ok(())
    }
}
