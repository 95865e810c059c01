// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{GraphFile, RawGraphFile};
use crate::errors::{ArcguardError, Result};

impl TryFrom<RawGraphFile> for GraphFile {
    type Error = ArcguardError;

    fn try_from(raw: RawGraphFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_graph(&raw)?;
        Ok(GraphFile::new_unchecked(raw.graph, raw.node))
    }
}

fn validate_raw_graph(raw: &RawGraphFile) -> Result<()> {
    ensure_has_nodes(raw)?;
    validate_parent_references(raw)?;
    if !raw.graph.allow_cycles {
        validate_acyclic(raw)?;
    }
    Ok(())
}

fn ensure_has_nodes(raw: &RawGraphFile) -> Result<()> {
    if raw.node.is_empty() {
        return Err(ArcguardError::Config(
            "graph must contain at least one [node.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_parent_references(raw: &RawGraphFile) -> Result<()> {
    for (id, node) in raw.node.iter() {
        for parent in node.parents.iter() {
            if !raw.node.contains_key(parent) {
                return Err(ArcguardError::Config(format!(
                    "node '{}' has unknown parent '{}'",
                    id, parent
                )));
            }
            if parent == id {
                return Err(ArcguardError::Config(format!(
                    "node '{}' cannot be its own parent",
                    id
                )));
            }
        }
    }
    Ok(())
}

fn validate_acyclic(raw: &RawGraphFile) -> Result<()> {
    // Edge direction: parent -> child.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for id in raw.node.keys() {
        graph.add_node(id.as_str());
    }

    for (id, node) in raw.node.iter() {
        for parent in node.parents.iter() {
            graph.add_edge(parent.as_str(), id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(ArcguardError::Cycle(format!(
            "cycle detected involving node '{}'",
            cycle.node_id()
        ))),
    }
}
