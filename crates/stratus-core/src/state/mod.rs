//! State persistence and the merge between runs.

pub mod store;
pub mod types;

pub use store::StateStore;
pub use types::{PersistedState, STATE_FORMAT_VERSION};

use crate::graph::EntryGraph;

/// Copy forward the persisted `result` of every candidate entry that also
/// exists in the current graph.
///
/// The candidate graph is recomputed from scratch each run and never carries
/// results of its own; merging lets the planner recognize an unchanged entry
/// without re-querying the provider for its output.
pub fn merge(candidate: &mut EntryGraph, current: &EntryGraph) {
    for (id, entry) in candidate.iter_mut() {
        if let Some(prior) = current.get(id)
            && prior.result.is_some()
        {
            entry.result = prior.result.clone();
        }
    }
}
