// src/scan/scanner.rs

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::errors::{ArcguardError, Result};
use crate::graph::Graph;
use crate::scan::counter::AverageCounter;
use crate::types::NodeId;

/// Arrival counts saturate here: nothing downstream distinguishes two
/// arrivals from more.
const SATURATED: u8 = 2;

/// One BFS level: how many times each node is reached on this level.
type Frontier<'g> = BTreeMap<&'g NodeId, u8>;

/// Compute the parent tree of `node`: the ancestors that must not become new
/// parents of `node`.
///
/// Walks upward level by level starting from the direct parents:
///
/// - an ordinary ancestor is always added and its parents are enqueued;
/// - an average ancestor is skipped the first time it is reached, and added
///   and expanded (once) on the second arrival.
///
/// Every path counts, so an ordinary node reached along two paths sends two
/// arrivals to each of its parents. A parent listed twice counts twice too.
///
/// # Errors
///
/// - [`ArcguardError::NodeNotFound`] if `node` or a referenced parent is not
///   in the graph.
/// - [`ArcguardError::Cycle`] if the walk reaches a cycle made only of
///   ordinary nodes, where it would otherwise never finish.
pub fn forbidden_ancestors(graph: &Graph, node: &str) -> Result<BTreeSet<NodeId>> {
    let start = graph.require(node)?;

    let mut parent_tree: BTreeSet<NodeId> = BTreeSet::new();
    let mut averages = AverageCounter::new();
    let mut frontier = Frontier::new();
    push_parents(&mut frontier, &start.parents, 1);

    let max_levels = level_limit(graph);
    let mut level = 0usize;

    while !frontier.is_empty() {
        level += 1;
        if level > max_levels {
            return Err(ArcguardError::Cycle(format!(
                "ancestor scan from '{}' did not finish after {} levels; \
                 a cycle of non-average nodes is reachable",
                node, max_levels
            )));
        }

        let mut next = Frontier::new();

        for (&id, &arrivals) in frontier.iter() {
            let parent = graph.require(id.as_str())?;

            if parent.kind.is_average() {
                if averages.record(id, arrivals) {
                    trace!(node = %id, level, "average node reached twice; expanding");
                    parent_tree.insert(id.clone());
                    push_parents(&mut next, &parent.parents, 1);
                } else {
                    trace!(node = %id, level, state = ?averages.get(id), "average node held back");
                }
            } else {
                parent_tree.insert(id.clone());
                push_parents(&mut next, &parent.parents, arrivals);
            }
        }

        frontier = next;
    }

    debug!(
        node = %node,
        levels = level,
        forbidden = parent_tree.len(),
        "ancestor scan finished"
    );

    Ok(parent_tree)
}

fn push_parents<'g>(frontier: &mut Frontier<'g>, parents: &'g [NodeId], arrivals: u8) {
    for parent in parents {
        let slot = frontier.entry(parent).or_insert(0);
        *slot = slot.saturating_add(arrivals).min(SATURATED);
    }
}

/// Upper bound on the number of levels a scan can take without running
/// around an ordinary-only cycle.
///
/// Each average node expands on one level only, so any chain of arrivals
/// holds at most `averages` of them. Between two of those, a chain longer
/// than `ordinary` ordinary nodes must repeat one.
fn level_limit(graph: &Graph) -> usize {
    let averages = graph.average_count();
    let ordinary = graph.len() - averages;
    (averages + 1).saturating_mul(ordinary + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn ids(set: &BTreeSet<NodeId>) -> Vec<&str> {
        set.iter().map(|id| id.as_str()).collect()
    }

    fn build(nodes: Vec<Node>) -> Graph {
        let mut g = Graph::new();
        for n in nodes {
            g.insert(n).unwrap();
        }
        g
    }

    #[test]
    fn node_without_parents_has_empty_parent_tree() {
        let g = build(vec![Node::ordinary("n")]);
        assert!(forbidden_ancestors(&g, "n").unwrap().is_empty());
    }

    #[test]
    fn linear_chain_forbids_all_ancestors() {
        let g = build(vec![
            Node::ordinary("a"),
            Node::ordinary("b").with_parent("a"),
            Node::ordinary("c").with_parent("b"),
            Node::ordinary("n").with_parent("c"),
        ]);
        assert_eq!(ids(&forbidden_ancestors(&g, "n").unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn average_reached_once_blocks_the_walk() {
        let g = build(vec![
            Node::ordinary("r"),
            Node::average("m").with_parent("r"),
            Node::ordinary("n").with_parent("m"),
        ]);
        assert!(forbidden_ancestors(&g, "n").unwrap().is_empty());
    }

    #[test]
    fn average_reached_twice_is_forbidden_and_expanded() {
        let g = build(vec![
            Node::ordinary("r"),
            Node::average("m").with_parent("r"),
            Node::ordinary("x").with_parent("m"),
            Node::ordinary("y").with_parent("m"),
            Node::ordinary("n").with_parent("x").with_parent("y"),
        ]);
        assert_eq!(
            ids(&forbidden_ancestors(&g, "n").unwrap()),
            vec!["m", "r", "x", "y"]
        );
    }

    #[test]
    fn arrivals_on_different_levels_add_up() {
        // n -> m directly, and n -> a -> b -> m.
        let g = build(vec![
            Node::ordinary("r"),
            Node::average("m").with_parent("r"),
            Node::ordinary("b").with_parent("m"),
            Node::ordinary("a").with_parent("b"),
            Node::ordinary("n").with_parent("m").with_parent("a"),
        ]);
        assert_eq!(
            ids(&forbidden_ancestors(&g, "n").unwrap()),
            vec!["a", "b", "m", "r"]
        );
    }

    #[test]
    fn paths_multiply_through_shared_ordinary_ancestor() {
        // Two paths meet at x, then continue together into m.
        let g = build(vec![
            Node::ordinary("r"),
            Node::average("m").with_parent("r"),
            Node::ordinary("x").with_parent("m"),
            Node::ordinary("y").with_parent("x"),
            Node::ordinary("z").with_parent("x"),
            Node::ordinary("n").with_parent("y").with_parent("z"),
        ]);
        let tree = forbidden_ancestors(&g, "n").unwrap();
        assert!(tree.contains("m"));
        assert!(tree.contains("r"));
    }

    #[test]
    fn duplicate_parent_entry_counts_as_two_paths() {
        let g = build(vec![
            Node::average("m"),
            Node::ordinary("n").with_parent("m").with_parent("m"),
        ]);
        assert_eq!(ids(&forbidden_ancestors(&g, "n").unwrap()), vec!["m"]);
    }

    #[test]
    fn unknown_node_is_reported() {
        let g = build(vec![Node::ordinary("n")]);
        let err = forbidden_ancestors(&g, "missing").unwrap_err();
        assert!(matches!(err, ArcguardError::NodeNotFound(id) if id == "missing"));
    }

    #[test]
    fn dangling_parent_reference_is_reported() {
        let g = build(vec![Node::ordinary("n").with_parent("ghost")]);
        let err = forbidden_ancestors(&g, "n").unwrap_err();
        assert!(matches!(err, ArcguardError::NodeNotFound(id) if id == "ghost"));
    }

    #[test]
    fn ordinary_cycle_is_an_error() {
        let g = build(vec![
            Node::ordinary("a").with_parent("b"),
            Node::ordinary("b").with_parent("a"),
            Node::ordinary("n").with_parent("a"),
        ]);
        let err = forbidden_ancestors(&g, "n").unwrap_err();
        assert!(matches!(err, ArcguardError::Cycle(_)));
    }

    #[test]
    fn cycle_through_average_node_terminates() {
        // a <-> m where m is an average node: m expands only once.
        let g = build(vec![
            Node::ordinary("a").with_parent("m"),
            Node::average("m").with_parent("a"),
            Node::ordinary("n").with_parent("a").with_parent("m"),
        ]);
        let tree = forbidden_ancestors(&g, "n").unwrap();
        assert_eq!(ids(&tree), vec!["a", "m"]);
    }
}
