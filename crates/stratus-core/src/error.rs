//! Engine error taxonomy.
//!
//! Planning errors are pure validation errors raised before any side effect.
//! Apply errors occur after real provider side effects may already have
//! happened; the engine never rolls back. It persists the partial graph and
//! surfaces the first error so a later reconcile can resume.

use thiserror::Error;

use crate::entry::EntryId;
use crate::plan::StepKind;

#[derive(Debug, Error)]
pub enum EngineError {
    /// An entry's kind has no registered handler. Fatal at plan time, before
    /// any side effect; silently skipping a declared resource is worse than
    /// failing the run.
    #[error("no handler registered for resource kind '{0}'")]
    HandlerNotFound(String),

    /// Nothing to plan: neither a candidate nor a current graph was provided.
    #[error("nothing to reconcile: candidate and current graphs are both empty")]
    EntriesNotFound,

    /// A needed dependency output is absent, e.g. an identifier read before
    /// the producing entry has completed.
    #[error("resource '{resource}' ({entry_id}) has no '{field}' output")]
    IncompleteResource {
        resource: String,
        entry_id: EntryId,
        field: String,
    },

    /// The dependency edges do not form a DAG.
    #[error("dependency cycle through entry {0}")]
    DependencyCycle(EntryId),

    /// A candidate entry depends on an id not present in the candidate graph.
    #[error("entry {entry_id} depends on unknown entry {dependency}")]
    MissingDependency {
        entry_id: EntryId,
        dependency: EntryId,
    },

    /// A handler operation failed. Completed steps stay committed.
    #[error("{kind} of entry {entry_id} failed: {reason}")]
    StepFailed {
        kind: StepKind,
        entry_id: EntryId,
        reason: anyhow::Error,
    },

    /// The apply run was cancelled between steps.
    #[error("apply run cancelled before completion")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_not_found_names_kind() {
        let err = EngineError::HandlerNotFound("queue-mapping".to_string());
        assert!(err.to_string().contains("queue-mapping"));
    }

    #[test]
    fn test_incomplete_resource_names_field() {
        let err = EngineError::IncompleteResource {
            resource: "role".to_string(),
            entry_id: EntryId::new("abc"),
            field: "arn".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("role"));
        assert!(rendered.contains("abc"));
        assert!(rendered.contains("arn"));
    }

    #[test]
    fn test_step_failed_names_entry() {
        let err = EngineError::StepFailed {
            kind: StepKind::Create,
            entry_id: EntryId::new("abc"),
            reason: anyhow::anyhow!("provider unavailable"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("create"));
        assert!(rendered.contains("abc"));
        assert!(rendered.contains("provider unavailable"));
    }
}
