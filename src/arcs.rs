// src/arcs.rs

//! Arc eligibility on top of the ancestor scan.
//!
//! The parent tree of a node lists what must *not* become a new parent.
//! This module turns that into the candidate set, guards arc insertion with
//! it, and summarises the whole graph.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info, warn};

use crate::errors::{ArcguardError, Result};
use crate::graph::Graph;
use crate::scan::forbidden_ancestors;
use crate::types::NodeId;

/// Nodes that may become a new parent of `node` without creating a Bad
/// Subgraph: every node outside its parent tree, except `node` itself.
pub fn available_arcs(graph: &Graph, node: &str) -> Result<BTreeSet<NodeId>> {
    let forbidden = forbidden_ancestors(graph, node)?;

    let available: BTreeSet<NodeId> = graph
        .ids()
        .into_iter()
        .filter(|id| id.as_str() != node && !forbidden.contains(*id))
        .cloned()
        .collect();

    debug!(
        node = %node,
        forbidden = forbidden.len(),
        available = available.len(),
        "available arcs computed"
    );

    Ok(available)
}

/// Add `parent` as a new parent of `child`, if that arc is available.
///
/// Fails with [`ArcguardError::ArcRejected`] when `parent` is in `child`'s
/// parent tree (or is `child` itself), and with [`ArcguardError::Cycle`]
/// when `parent` descends from `child`. The graph is left untouched then.
pub fn add_arc(graph: &mut Graph, child: &str, parent: &str) -> Result<()> {
    graph.require(parent)?;

    let available = available_arcs(graph, child)?;
    if !available.contains(parent) {
        warn!(child = %child, parent = %parent, "arc rejected");
        return Err(ArcguardError::ArcRejected {
            child: child.to_string(),
            parent: parent.to_string(),
        });
    }

    if descends_from(graph, parent, child)? {
        warn!(child = %child, parent = %parent, "arc would close a cycle");
        return Err(ArcguardError::Cycle(format!(
            "adding '{}' as parent of '{}' closes a cycle",
            parent, child
        )));
    }

    graph.add_parent(child, parent)?;
    debug!(child = %child, parent = %parent, "arc added");
    Ok(())
}

/// Whether `node` is reachable from `ancestor` by following children.
fn descends_from(graph: &Graph, node: &str, ancestor: &str) -> Result<bool> {
    let mut stack: Vec<&NodeId> = graph.children_of(ancestor)?.iter().collect();
    let mut visited: HashSet<&NodeId> = HashSet::new();

    while let Some(id) = stack.pop() {
        if id.as_str() == node {
            return Ok(true);
        }
        if !visited.insert(id) {
            continue;
        }
        stack.extend(graph.children_of(id.as_str())?.iter());
    }

    Ok(false)
}

/// Per-node line of a [`GraphReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub id: NodeId,
    pub forbidden: usize,
    pub available: usize,
}

impl NodeReport {
    /// The node's parent tree covers the rest of the graph.
    pub fn is_saturated(&self) -> bool {
        self.available == 0
    }
}

/// Eligibility summary for every node of a graph, in id order.
#[derive(Debug, Clone, Default)]
pub struct GraphReport {
    pub nodes: Vec<NodeReport>,
}

impl GraphReport {
    /// Nodes that can take no new parent at all.
    pub fn saturated(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_saturated())
            .map(|n| &n.id)
    }
}

/// Scan every node and collect its forbidden and available counts.
pub fn report(graph: &Graph) -> Result<GraphReport> {
    let mut nodes = Vec::with_capacity(graph.len());

    for id in graph.ids() {
        let forbidden = forbidden_ancestors(graph, id.as_str())?;
        let available = graph
            .ids()
            .into_iter()
            .filter(|other| *other != id && !forbidden.contains(*other))
            .count();

        nodes.push(NodeReport {
            id: id.clone(),
            forbidden: forbidden.len(),
            available,
        });
    }

    let report = GraphReport { nodes };
    info!(
        nodes = report.nodes.len(),
        saturated = report.saturated().count(),
        "graph report complete"
    );
    Ok(report)
}
