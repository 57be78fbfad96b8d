//! Dependency-respecting scheduling order for planned steps.
//!
//! Nodes are inserted in sorted id order, so ties between independent
//! entries resolve the same way on every run.

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::entry::EntryId;
use crate::error::EngineError;
use crate::graph::EntryGraph;

/// Topological order over the candidate graph: every entry comes after all
/// of its dependencies.
///
/// Fails on a dependency edge pointing outside the graph and on cycles.
pub(crate) fn creation_order(graph: &EntryGraph) -> Result<Vec<EntryId>, EngineError> {
    let mut dag: DiGraph<EntryId, ()> = DiGraph::with_capacity(graph.len(), graph.len());
    let mut indices: BTreeMap<&EntryId, NodeIndex> = BTreeMap::new();

    for id in graph.ids() {
        indices.insert(id, dag.add_node(id.clone()));
    }
    for (id, entry) in graph.iter() {
        let Some(&node) = indices.get(id) else {
            continue;
        };
        for dep in &entry.dependencies {
            let Some(&dep_node) = indices.get(dep) else {
                return Err(EngineError::MissingDependency {
                    entry_id: id.clone(),
                    dependency: dep.clone(),
                });
            };
            dag.add_edge(dep_node, node, ());
        }
    }

    sort(dag)
}

/// Reverse topological order over the entries present in `current` but
/// absent from `candidate`: every removed entry comes before the removed
/// entries it depends on, so nothing is deleted while a dependent remains.
///
/// Dependency edges into entries that survive are ignored; those entries
/// are not being deleted.
pub(crate) fn deletion_order(
    current: &EntryGraph,
    candidate: &EntryGraph,
) -> Result<Vec<EntryId>, EngineError> {
    let mut dag: DiGraph<EntryId, ()> = DiGraph::new();
    let mut indices: BTreeMap<&EntryId, NodeIndex> = BTreeMap::new();

    for id in current.ids().filter(|id| !candidate.contains(id)) {
        indices.insert(id, dag.add_node(id.clone()));
    }
    for (id, entry) in current.iter() {
        let Some(&node) = indices.get(id) else {
            continue;
        };
        for dep in &entry.dependencies {
            if let Some(&dep_node) = indices.get(dep) {
                dag.add_edge(dep_node, node, ());
            }
        }
    }

    let mut order = sort(dag)?;
    order.reverse();
    Ok(order)
}

fn sort(dag: DiGraph<EntryId, ()>) -> Result<Vec<EntryId>, EngineError> {
    match toposort(&dag, None) {
        Ok(order) => Ok(order.into_iter().map(|ix| dag[ix].clone()).collect()),
        Err(cycle) => Err(EngineError::DependencyCycle(dag[cycle.node_id()].clone())),
    }
}
