//! Entry model: one governable resource node.
//!
//! Tracks the declared kind, stable identity, dependency edges, desired
//! parameters, and the materialized provider output.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque, stable identifier for an entry.
///
/// Derived from a content hash of the resource kind and its semantic name
/// (see [`crate::identity::entry_id`]), so the same logical resource maps to
/// the same id across runs regardless of declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One resource node in an entry graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Resource-kind tag identifying the owning handler.
    #[serde(rename = "type")]
    pub kind: String,

    /// Stable identity within the graph.
    #[serde(rename = "entryId")]
    pub entry_id: EntryId,

    /// Ids of entries that must reach a terminal state before this one is
    /// created or updated, and after it when deleting.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dependencies: BTreeSet<EntryId>,

    /// Desired configuration, meaningful only to the owning handler.
    #[serde(default)]
    pub parameters: Value,

    /// Materialized provider output (ids, ARNs, URLs). Absent until the
    /// first successful create/update/replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl Entry {
    /// Create a new entry with no dependencies and no result.
    pub fn new(kind: impl Into<String>, entry_id: EntryId, parameters: Value) -> Self {
        Self {
            kind: kind.into(),
            entry_id,
            dependencies: BTreeSet::new(),
            parameters,
            result: None,
        }
    }

    /// Add a single dependency edge.
    pub fn with_dependency(mut self, id: EntryId) -> Self {
        self.dependencies.insert(id);
        self
    }

    /// Add several dependency edges.
    pub fn with_dependencies(mut self, ids: impl IntoIterator<Item = EntryId>) -> Self {
        self.dependencies.extend(ids);
        self
    }

    /// Set the materialized output.
    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Whether this entry belongs to the given resource kind.
    pub fn is_of_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Merge another declaration of the same logical resource into this one.
    ///
    /// Dependencies are unioned; non-null incoming parameters replace the
    /// current ones; an existing result survives unless the incoming entry
    /// carries its own.
    pub fn merge(&mut self, other: Entry) {
        self.dependencies.extend(other.dependencies);
        if !other.parameters.is_null() {
            self.parameters = other.parameters;
        }
        if other.result.is_some() {
            self.result = other.result;
        }
    }
}
