// src/graph/arena.rs

use std::collections::HashMap;

use crate::config::model::GraphFile;
use crate::errors::{ArcguardError, Result};
use crate::types::{NodeId, NodeKind};

/// A graph vertex: its kind and direct parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Direct predecessors, in insertion order. Duplicates are kept.
    pub parents: Vec<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            parents: Vec::new(),
        }
    }

    pub fn ordinary(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::default())
    }

    pub fn average(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Average)
    }

    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parents.push(parent.into());
        self
    }
}

/// Internal arena slot: the node plus its reverse adjacency.
#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    /// Direct children: nodes that list this one among their parents.
    children: Vec<NodeId>,
}

/// In-memory arena of nodes keyed by id.
///
/// Parents are stored as ids, so a node may reference a parent that is
/// inserted later. Lookups through [`Graph::parents_of`] and friends return
/// `NodeNotFound` for ids that never showed up.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    slots: HashMap<NodeId, Slot>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a validated [`GraphFile`].
    pub fn from_config(cfg: &GraphFile) -> Self {
        let mut graph = Graph::new();
        for (id, nc) in cfg.node.iter() {
            graph.slots.insert(
                id.clone(),
                Slot {
                    node: Node {
                        id: id.clone(),
                        kind: nc.kind.clone(),
                        parents: nc.parents.clone(),
                    },
                    children: Vec::new(),
                },
            );
        }
        graph.rebuild_children();
        graph
    }

    /// Insert a new node. Fails if a node with the same id already exists.
    pub fn insert(&mut self, node: Node) -> Result<()> {
        if self.slots.contains_key(&node.id) {
            return Err(ArcguardError::Config(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
        let id = node.id.clone();
        for parent in node.parents.iter() {
            if let Some(slot) = self.slots.get_mut(parent) {
                slot.children.push(id.clone());
            }
        }
        // Earlier nodes may already reference this id as a parent.
        let children = self
            .slots
            .values()
            .flat_map(|s| {
                let n = s.node.parents.iter().filter(|p| **p == id).count();
                std::iter::repeat_n(s.node.id.clone(), n)
            })
            .collect();
        self.slots.insert(id, Slot { node, children });
        Ok(())
    }

    /// Append `parent` to `child`'s parents without any eligibility check.
    ///
    /// Use [`crate::arcs::add_arc`] to add an arc only when it is allowed.
    pub fn add_parent(&mut self, child: &str, parent: &str) -> Result<()> {
        let parent_id = self.require(parent)?.id.clone();
        let child_id = self.require(child)?.id.clone();

        if let Some(slot) = self.slots.get_mut(child) {
            slot.node.parents.push(parent_id);
        }
        if let Some(slot) = self.slots.get_mut(parent) {
            slot.children.push(child_id);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.slots.get(id).map(|s| &s.node)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All node ids, sorted.
    pub fn ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<&NodeId> = self.slots.keys().collect();
        ids.sort();
        ids
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.values().map(|s| &s.node)
    }

    /// Look up a node, failing with `NodeNotFound` if it is absent.
    pub fn require(&self, id: &str) -> Result<&Node> {
        self.get(id)
            .ok_or_else(|| ArcguardError::NodeNotFound(id.to_string()))
    }

    pub fn parents_of(&self, id: &str) -> Result<&[NodeId]> {
        Ok(self.require(id)?.parents.as_slice())
    }

    pub fn children_of(&self, id: &str) -> Result<&[NodeId]> {
        self.slots
            .get(id)
            .map(|s| s.children.as_slice())
            .ok_or_else(|| ArcguardError::NodeNotFound(id.to_string()))
    }

    pub fn kind_of(&self, id: &str) -> Result<&NodeKind> {
        Ok(&self.require(id)?.kind)
    }

    /// Number of nodes whose kind is `average`.
    pub fn average_count(&self) -> usize {
        self.nodes().filter(|n| n.kind.is_average()).count()
    }

    fn rebuild_children(&mut self) {
        let edges: Vec<(NodeId, NodeId)> = self
            .slots
            .values()
            .flat_map(|s| {
                s.node
                    .parents
                    .iter()
                    .map(move |p| (p.clone(), s.node.id.clone()))
            })
            .collect();

        for slot in self.slots.values_mut() {
            slot.children.clear();
        }
        for (parent, child) in edges {
            if let Some(slot) = self.slots.get_mut(&parent) {
                slot.children.push(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_links_children_in_either_order() {
        let mut g = Graph::new();
        g.insert(Node::ordinary("b").with_parent("a")).unwrap();
        g.insert(Node::ordinary("a")).unwrap();
        g.insert(Node::ordinary("c").with_parent("a")).unwrap();

        let mut children: Vec<&str> = g
            .children_of("a")
            .unwrap()
            .iter()
            .map(|c| c.as_str())
            .collect();
        children.sort();
        assert_eq!(children, vec!["b", "c"]);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut g = Graph::new();
        g.insert(Node::ordinary("a")).unwrap();
        let err = g.insert(Node::average("a")).unwrap_err();
        assert!(matches!(err, ArcguardError::Config(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn add_parent_requires_both_nodes() {
        let mut g = Graph::new();
        g.insert(Node::ordinary("a")).unwrap();
        let err = g.add_parent("a", "missing").unwrap_err();
        assert!(matches!(err, ArcguardError::NodeNotFound(id) if id == "missing"));

        g.insert(Node::average("m")).unwrap();
        g.add_parent("a", "m").unwrap();
        assert_eq!(g.parents_of("a").unwrap(), &[NodeId::from("m")]);
        assert_eq!(g.children_of("m").unwrap(), &[NodeId::from("a")]);
        assert_eq!(g.average_count(), 1);
        assert!(g.kind_of("m").unwrap().is_average());
        assert!(g.contains("a") && !g.contains("missing"));
    }

    #[test]
    fn ids_are_sorted() {
        let mut g = Graph::new();
        for id in ["c", "a", "b"] {
            g.insert(Node::ordinary(id)).unwrap();
        }
        let ids: Vec<&str> = g.ids().into_iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
