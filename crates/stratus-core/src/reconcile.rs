//! Reconcile: the full Load → Merge → Plan → Apply → Save cycle.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::apply::apply;
use crate::error::EngineError;
use crate::graph::EntryGraph;
use crate::handler::HandlerRegistry;
use crate::plan::{PlanSummary, plan};
use crate::state::{self, StateStore};

/// Result of one reconcile run.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The graph as persisted: exactly what was applied, not what was
    /// intended.
    pub state: EntryGraph,

    /// What the planner scheduled.
    pub summary: PlanSummary,

    /// The first apply failure, if the run stopped early. Completed steps
    /// stay committed and persisted; the next reconcile resumes from them.
    pub error: Option<EngineError>,
}

impl ReconcileOutcome {
    /// Whether real state now matches the declared candidate graph.
    pub fn is_converged(&self) -> bool {
        self.error.is_none()
    }
}

/// Drive real infrastructure to match `candidate`, persisting the outcome at
/// `state_path`.
///
/// Planning errors (unknown handler, cycle, nothing to plan) surface as `Err`
/// before any side effect. Apply errors never prevent the save: the state
/// file reflects what actually happened, and the error rides along in the
/// outcome for the caller to report.
pub fn reconcile(
    candidate: EntryGraph,
    state_path: &Path,
    registry: &HandlerRegistry,
) -> anyhow::Result<ReconcileOutcome> {
    let store = StateStore::new(state_path);
    let current = store.load()?;

    let mut candidate = candidate;
    state::merge(&mut candidate, &current);

    let steps = plan(&candidate, &current, registry)?;
    let summary = PlanSummary::of(&steps);
    info!(%summary, "reconcile planned");

    let outcome = apply(&steps, &current, None);
    store
        .save(&outcome.state)
        .context("Failed to persist reconciled state")?;

    Ok(ReconcileOutcome {
        state: outcome.state,
        summary,
        error: outcome.error,
    })
}
