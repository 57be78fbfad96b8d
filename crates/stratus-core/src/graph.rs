//! Entry graph: the complete set of entries for one desired or persisted state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId};

/// Mapping from entry id to entry.
///
/// Either the freshly built candidate graph or the current (persisted) graph.
/// Backed by an ordered map so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryGraph {
    entries: BTreeMap<EntryId, Entry>,
}

impl EntryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph by attaching every entry in turn.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut graph = Self::new();
        for entry in entries {
            graph.attach(entry);
        }
        graph
    }

    /// Insert or merge an entry keyed by its id.
    ///
    /// Attaching an id already present merges the two declarations (they must
    /// represent the same logical resource). This is what lets independent
    /// provider modules incrementally build one shared candidate graph.
    pub fn attach(&mut self, entry: Entry) {
        match self.entries.get_mut(&entry.entry_id) {
            Some(existing) => existing.merge(entry),
            None => {
                self.entries.insert(entry.entry_id.clone(), entry);
            }
        }
    }

    /// Insert an entry, replacing any previous node with the same id.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.entry_id.clone(), entry)
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: &EntryId) -> Option<Entry> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate over ids in deterministic order.
    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.entries.keys()
    }

    /// Iterate over (id, entry) pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntryId, &Entry)> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&EntryId, &mut Entry)> {
        self.entries.iter_mut()
    }

    /// Iterate over entries in deterministic order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Entries belonging to the given resource kind.
    pub fn entries_of_kind(&self, kind: &str) -> Vec<&Entry> {
        self.entries.values().filter(|e| e.is_of_kind(kind)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
