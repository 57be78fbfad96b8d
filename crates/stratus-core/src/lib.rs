//! Stratus Core Library
//!
//! Provider-agnostic graph reconciliation for declarative infrastructure:
//! a candidate entry graph is diffed against the previously persisted state,
//! planned into an ordered list of steps, and applied through per-kind
//! resource handlers, with the outcome durably recorded for the next run.

pub mod apply;
pub mod entry;
pub mod error;
pub mod graph;
pub mod handler;
pub mod identity;
pub mod plan;
pub mod reconcile;
pub mod state;

/// Re-exports of commonly used types
pub mod prelude {
    // Model
    pub use crate::entry::{Entry, EntryId};
    pub use crate::graph::EntryGraph;
    pub use crate::identity::entry_id;

    // Handlers
    pub use crate::handler::{Handler, HandlerRegistry};

    // State
    pub use crate::state::{PersistedState, STATE_FORMAT_VERSION, StateStore};

    // Planning and application
    pub use crate::apply::{ApplyOutcome, CancelToken, StepContext, apply};
    pub use crate::plan::{PlanSummary, Step, StepKind, plan};

    // Orchestration
    pub use crate::error::EngineError;
    pub use crate::reconcile::{ReconcileOutcome, reconcile};
}
