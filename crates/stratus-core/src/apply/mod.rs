//! Applier: executes planned steps against their handlers.
//!
//! Steps run strictly in plan order. Each step writes exclusively to its own
//! node in the working graph, so a dependent only ever reads dependency
//! outputs that earlier steps have committed. The first failure stops the
//! run. Completed steps are never rolled back, because the underlying
//! provider side effects are not cheaply reversible. A later reconcile
//! re-plans against the partially advanced state and resumes.

pub mod context;

pub use context::StepContext;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::{debug, warn};

use crate::entry::Entry;
use crate::error::EngineError;
use crate::graph::EntryGraph;
use crate::plan::Step;

/// Cooperative cancellation flag checked between steps, never mid-step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the run stops before its next step.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of an apply run: the graph as actually advanced, and the first
/// error if the run stopped early.
#[derive(Debug)]
pub struct ApplyOutcome {
    pub state: EntryGraph,
    pub error: Option<EngineError>,
}

impl ApplyOutcome {
    /// Whether every step ran to completion.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Execute `steps` in order against a working copy of `current`.
///
/// The returned graph always reflects exactly what was applied: results of
/// completed steps are committed, untouched entries keep their recorded
/// state, and nothing is recorded for a failed or skipped step.
pub fn apply(
    steps: &[Step<'_>],
    current: &EntryGraph,
    cancel: Option<&CancelToken>,
) -> ApplyOutcome {
    let mut state = current.clone();

    for step in steps {
        if let Some(token) = cancel
            && token.is_cancelled()
        {
            warn!("apply run cancelled, keeping completed steps");
            return ApplyOutcome {
                state,
                error: Some(EngineError::Cancelled),
            };
        }

        if let Err(err) = execute(step, &mut state) {
            warn!(entry = %step.entry_id(), error = %err, "step failed, stopping apply run");
            return ApplyOutcome {
                state,
                error: Some(err),
            };
        }
    }

    ApplyOutcome { state, error: None }
}

fn execute(step: &Step<'_>, state: &mut EntryGraph) -> Result<(), EngineError> {
    match step {
        Step::Noop { desired, .. } => {
            state.insert(desired.clone());
            Ok(())
        }
        Step::Create { desired, handler } => {
            debug!(entry = %desired.entry_id, kind = %desired.kind, "creating");
            let produced = {
                let ctx = StepContext::new(desired, state);
                handler.create(desired, &ctx)
            };
            commit(step, state, desired, produced)
        }
        Step::Update {
            desired,
            recorded,
            handler,
        } => {
            debug!(entry = %desired.entry_id, kind = %desired.kind, "updating");
            let produced = {
                let ctx = StepContext::new(desired, state);
                handler.update(desired, recorded, &ctx)
            };
            commit(step, state, desired, produced)
        }
        Step::Replace {
            desired,
            recorded,
            handler,
        } => {
            debug!(entry = %desired.entry_id, kind = %desired.kind, "replacing");
            let produced = {
                let ctx = StepContext::new(desired, state);
                handler.replace(desired, recorded, &ctx)
            };
            commit(step, state, desired, produced)
        }
        Step::Delete { recorded, handler } => {
            debug!(entry = %recorded.entry_id, kind = %recorded.kind, "deleting");
            let outcome = {
                let ctx = StepContext::new(recorded, state);
                handler.delete(recorded, &ctx)
            };
            match outcome {
                Ok(()) => {
                    state.remove(&recorded.entry_id);
                    Ok(())
                }
                Err(reason) => Err(fail(step, reason)),
            }
        }
    }
}

/// Write the produced output into the step's own node.
fn commit(
    step: &Step<'_>,
    state: &mut EntryGraph,
    desired: &Entry,
    produced: anyhow::Result<Value>,
) -> Result<(), EngineError> {
    match produced {
        Ok(result) => {
            let mut entry = desired.clone();
            entry.result = Some(result);
            state.insert(entry);
            Ok(())
        }
        Err(reason) => Err(fail(step, reason)),
    }
}

fn fail(step: &Step<'_>, reason: anyhow::Error) -> EngineError {
    EngineError::StepFailed {
        kind: step.kind(),
        entry_id: step.entry_id().clone(),
        reason,
    }
}
