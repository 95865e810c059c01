#![allow(dead_code)]

use std::collections::BTreeMap;

use arcguard::config::{GraphFile, GraphSection, NodeConfig, RawGraphFile};
use arcguard::graph::Graph;
use arcguard::types::{NodeId, NodeKind};

/// Builder for `GraphFile` to simplify test setup.
pub struct GraphFileBuilder {
    raw: RawGraphFile,
}

impl GraphFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawGraphFile {
                graph: GraphSection::default(),
                node: BTreeMap::new(),
            },
        }
    }

    pub fn with_node(mut self, id: &str, node: NodeConfig) -> Self {
        self.raw.node.insert(NodeId::from(id), node);
        self
    }

    pub fn allow_cycles(mut self, val: bool) -> Self {
        self.raw.graph.allow_cycles = val;
        self
    }

    /// The unvalidated description, for tests that exercise validation.
    pub fn build_raw(self) -> RawGraphFile {
        self.raw
    }

    pub fn build(self) -> GraphFile {
        GraphFile::try_from(self.raw).expect("Failed to build valid graph from builder")
    }

    /// Shortcut: validated description straight into an arena [`Graph`].
    pub fn build_graph(self) -> Graph {
        Graph::from_config(&self.build())
    }
}

impl Default for GraphFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeConfig`.
pub struct NodeConfigBuilder {
    node: NodeConfig,
}

impl NodeConfigBuilder {
    pub fn ordinary() -> Self {
        Self {
            node: NodeConfig {
                kind: NodeKind::default(),
                parents: vec![],
            },
        }
    }

    pub fn average() -> Self {
        Self {
            node: NodeConfig {
                kind: NodeKind::Average,
                parents: vec![],
            },
        }
    }

    pub fn kind(mut self, tag: &str) -> Self {
        self.node.kind = tag.parse().expect("invalid node kind in test");
        self
    }

    pub fn parent(mut self, id: &str) -> Self {
        self.node.parents.push(NodeId::from(id));
        self
    }

    pub fn build(self) -> NodeConfig {
        self.node
    }
}
