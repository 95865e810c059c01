// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{NodeId, NodeKind};

/// Graph description exactly as read from a TOML file, before validation.
///
/// ```toml
/// [graph]
/// allow_cycles = false
///
/// [node.a]
/// kind = "input"
///
/// [node.m]
/// kind = "average"
/// parents = ["a", "b"]
/// ```
///
/// Use `GraphFile::try_from` to obtain a validated description.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGraphFile {
    #[serde(default)]
    pub graph: GraphSection,

    /// All nodes from `[node.<id>]`, keyed by node id.
    #[serde(default)]
    pub node: BTreeMap<NodeId, NodeConfig>,
}

/// Validated graph description.
///
/// Only constructed through `TryFrom<RawGraphFile>` (see `validate.rs`), so
/// every parent reference is known to resolve.
#[derive(Debug, Clone)]
pub struct GraphFile {
    pub graph: GraphSection,
    pub node: BTreeMap<NodeId, NodeConfig>,
}

impl GraphFile {
    pub(crate) fn new_unchecked(graph: GraphSection, node: BTreeMap<NodeId, NodeConfig>) -> Self {
        Self { graph, node }
    }
}

/// `[graph]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphSection {
    /// Accept graphs with parent cycles.
    ///
    /// When `false` (default) loading fails on any cycle. When `true` the
    /// graph loads, and a scan fails only if it actually runs into a cycle
    /// made of ordinary nodes.
    #[serde(default)]
    pub allow_cycles: bool,
}

/// `[node.<id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    /// Kind tag; `"average"` is special, anything else is ordinary.
    #[serde(default)]
    pub kind: NodeKind,

    /// Direct parents, in order. Listing a parent twice counts as two paths.
    #[serde(default)]
    pub parents: Vec<NodeId>,
}
