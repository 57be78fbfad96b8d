//! Planner: diffs the candidate graph against the current graph and emits an
//! ordered list of steps.
//!
//! Planning is pure: it resolves handlers and validates the dependency
//! structure but performs no side effects, so every planning error is safe to
//! surface directly.

pub(crate) mod order;

use std::fmt;

use tracing::debug;

use crate::entry::{Entry, EntryId};
use crate::error::EngineError;
use crate::graph::EntryGraph;
use crate::handler::{Handler, HandlerRegistry};

/// The kind of action a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Create,
    Update,
    Replace,
    Delete,
    Noop,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Create => "create",
            StepKind::Update => "update",
            StepKind::Replace => "replace",
            StepKind::Delete => "delete",
            StepKind::Noop => "noop",
        };
        f.write_str(name)
    }
}

/// One planned action for one entry, carrying the declared entry, the
/// matching recorded entry where one exists, and the resolved handler.
///
/// Replace is a single step at the entry's scheduling position, an atomic
/// delete-then-create pair executed by the handler's `replace`.
#[derive(Debug)]
pub enum Step<'h> {
    Create {
        desired: Entry,
        handler: &'h dyn Handler,
    },
    Update {
        desired: Entry,
        recorded: Entry,
        handler: &'h dyn Handler,
    },
    Replace {
        desired: Entry,
        recorded: Entry,
        handler: &'h dyn Handler,
    },
    Delete {
        recorded: Entry,
        handler: &'h dyn Handler,
    },
    Noop {
        desired: Entry,
        recorded: Entry,
        handler: &'h dyn Handler,
    },
}

impl<'h> Step<'h> {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Create { .. } => StepKind::Create,
            Step::Update { .. } => StepKind::Update,
            Step::Replace { .. } => StepKind::Replace,
            Step::Delete { .. } => StepKind::Delete,
            Step::Noop { .. } => StepKind::Noop,
        }
    }

    /// The entry this step acts on: the declared entry, or the recorded one
    /// for a delete.
    pub fn entry(&self) -> &Entry {
        match self {
            Step::Create { desired, .. }
            | Step::Update { desired, .. }
            | Step::Replace { desired, .. }
            | Step::Noop { desired, .. } => desired,
            Step::Delete { recorded, .. } => recorded,
        }
    }

    pub fn entry_id(&self) -> &EntryId {
        &self.entry().entry_id
    }

    pub fn handler(&self) -> &'h dyn Handler {
        match self {
            Step::Create { handler, .. }
            | Step::Update { handler, .. }
            | Step::Replace { handler, .. }
            | Step::Delete { handler, .. }
            | Step::Noop { handler, .. } => *handler,
        }
    }
}

/// Per-kind step counts for caller reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub creates: usize,
    pub updates: usize,
    pub replaces: usize,
    pub deletes: usize,
    pub noops: usize,
}

impl PlanSummary {
    pub fn of(steps: &[Step<'_>]) -> Self {
        let mut summary = Self::default();
        for step in steps {
            match step.kind() {
                StepKind::Create => summary.creates += 1,
                StepKind::Update => summary.updates += 1,
                StepKind::Replace => summary.replaces += 1,
                StepKind::Delete => summary.deletes += 1,
                StepKind::Noop => summary.noops += 1,
            }
        }
        summary
    }

    /// Number of steps that touch the provider.
    pub fn changes(&self) -> usize {
        self.creates + self.updates + self.replaces + self.deletes
    }

    pub fn is_noop(&self) -> bool {
        self.changes() == 0
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to create, {} to update, {} to replace, {} to delete, {} unchanged",
            self.creates, self.updates, self.replaces, self.deletes, self.noops
        )
    }
}

/// Diff `candidate` against `current` into an ordered list of steps.
///
/// Deletes come first, in reverse dependency order over the removed entries;
/// then the candidate's steps in dependency order, so no entry is ever
/// scheduled before its dependencies or deleted while a dependent remains.
pub fn plan<'h>(
    candidate: &EntryGraph,
    current: &EntryGraph,
    registry: &'h HandlerRegistry,
) -> Result<Vec<Step<'h>>, EngineError> {
    if candidate.is_empty() && current.is_empty() {
        return Err(EngineError::EntriesNotFound);
    }

    let mut steps = Vec::with_capacity(candidate.len() + current.len());

    for id in order::deletion_order(current, candidate)? {
        let Some(recorded) = current.get(&id) else {
            continue;
        };
        let handler = registry.resolve(&recorded.kind)?;
        debug!(entry = %id, kind = %recorded.kind, "planned delete");
        steps.push(Step::Delete {
            recorded: recorded.clone(),
            handler,
        });
    }

    for id in order::creation_order(candidate)? {
        let Some(desired) = candidate.get(&id) else {
            continue;
        };
        let handler = registry.resolve(&desired.kind)?;

        let step = match current.get(&id) {
            None => {
                debug!(entry = %id, kind = %desired.kind, "planned create");
                Step::Create {
                    desired: desired.clone(),
                    handler,
                }
            }
            Some(recorded) => {
                if handler.equals(&desired.parameters, &recorded.parameters) {
                    // Unchanged: carry the recorded output forward untouched.
                    let mut unchanged = desired.clone();
                    unchanged.result = recorded.result.clone();
                    Step::Noop {
                        desired: unchanged,
                        recorded: recorded.clone(),
                        handler,
                    }
                } else if handler.requires_replace(&desired.parameters, &recorded.parameters) {
                    debug!(entry = %id, kind = %desired.kind, "planned replace");
                    Step::Replace {
                        desired: desired.clone(),
                        recorded: recorded.clone(),
                        handler,
                    }
                } else {
                    debug!(entry = %id, kind = %desired.kind, "planned update");
                    Step::Update {
                        desired: desired.clone(),
                        recorded: recorded.clone(),
                        handler,
                    }
                }
            }
        };
        steps.push(step);
    }

    Ok(steps)
}
