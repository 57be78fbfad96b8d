//! Step context: apply-time access to dependency outputs.
//!
//! Scoped to one entry's step and bound to the in-progress graph, so a
//! handler only ever sees results that earlier steps in the same run have
//! already committed. Accessors return `Result`: a missing output is the
//! typed incomplete-resource condition, never a runtime presence check at
//! the call site.

use serde_json::Value;

use crate::entry::{Entry, EntryId};
use crate::error::EngineError;
use crate::graph::EntryGraph;

/// Apply-time accessor for one step's dependency outputs.
#[derive(Debug)]
pub struct StepContext<'a> {
    entry: &'a Entry,
    graph: &'a EntryGraph,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(entry: &'a Entry, graph: &'a EntryGraph) -> Self {
        Self { entry, graph }
    }

    /// The entry this step acts on.
    pub fn entry(&self) -> &Entry {
        self.entry
    }

    /// The entry's dependencies, resolved against the in-progress graph.
    pub fn dependencies(&self) -> Vec<&'a Entry> {
        self.entry
            .dependencies
            .iter()
            .filter_map(|id| self.graph.get(id))
            .collect()
    }

    /// Dependencies belonging to the given resource kind.
    pub fn dependencies_of_kind(&self, kind: &str) -> Vec<&'a Entry> {
        self.dependencies()
            .into_iter()
            .filter(|e| e.is_of_kind(kind))
            .collect()
    }

    /// The first dependency of the given kind, if any.
    pub fn dependency_of_kind(&self, kind: &str) -> Option<&'a Entry> {
        self.dependencies().into_iter().find(|e| e.is_of_kind(kind))
    }

    /// The materialized output of a dependency.
    ///
    /// Fails with [`EngineError::IncompleteResource`] when the entry is not
    /// in the graph or has not produced a result yet.
    pub fn require_result(&self, id: &EntryId) -> Result<&'a Value, EngineError> {
        match self.graph.get(id).and_then(|e| e.result.as_ref()) {
            Some(result) => Ok(result),
            None => Err(EngineError::IncompleteResource {
                resource: self.kind_of(id),
                entry_id: id.clone(),
                field: "result".to_string(),
            }),
        }
    }

    /// One field of a dependency's materialized output.
    pub fn require_result_field(
        &self,
        id: &EntryId,
        field: &str,
    ) -> Result<&'a Value, EngineError> {
        let result = self.require_result(id)?;
        result.get(field).ok_or_else(|| EngineError::IncompleteResource {
            resource: self.kind_of(id),
            entry_id: id.clone(),
            field: field.to_string(),
        })
    }

    fn kind_of(&self, id: &EntryId) -> String {
        self.graph
            .get(id)
            .map(|e| e.kind.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
