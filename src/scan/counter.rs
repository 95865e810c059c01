// src/scan/counter.rs

//! Per-scan bookkeeping for average nodes.

use std::collections::HashMap;

use crate::types::NodeId;

/// How often an average node has been reached during one upward scan.
///
/// An absent entry in [`AverageCounter`] reads as `Unseen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    #[default]
    Unseen,
    /// Reached along one path; not yet a hazard and not expanded.
    SeenOnce,
    /// Reached along a second path; in the parent tree and expanded.
    Expanded,
}

impl VisitState {
    /// Numeric form (0, 1, 2).
    pub fn count(self) -> u8 {
        match self {
            VisitState::Unseen => 0,
            VisitState::SeenOnce => 1,
            VisitState::Expanded => 2,
        }
    }
}

/// Visit counter for average nodes, keyed by node id.
///
/// Lives for exactly one scan.
#[derive(Debug, Default)]
pub struct AverageCounter<'g> {
    states: HashMap<&'g NodeId, VisitState>,
}

impl<'g> AverageCounter<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `id`; `Unseen` when the node was never reached.
    pub fn get(&self, id: &NodeId) -> VisitState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Record `arrivals` more arrivals at `id`.
    ///
    /// Returns `true` exactly once per node: on the arrival that moves it
    /// from `SeenOnce` to `Expanded`. Arrivals after that are no-ops.
    pub fn record(&mut self, id: &'g NodeId, arrivals: u8) -> bool {
        let state = self.states.entry(id).or_default();
        let mut expanded_now = false;

        for _ in 0..arrivals {
            match *state {
                VisitState::Unseen => *state = VisitState::SeenOnce,
                VisitState::SeenOnce => {
                    *state = VisitState::Expanded;
                    expanded_now = true;
                }
                VisitState::Expanded => break,
            }
        }

        expanded_now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_reads_as_unseen() {
        let counter = AverageCounter::new();
        let id = NodeId::from("m");
        assert_eq!(counter.get(&id), VisitState::Unseen);
        assert_eq!(counter.get(&id).count(), 0);
    }

    #[test]
    fn second_arrival_expands_once() {
        let id = NodeId::from("m");
        let mut counter = AverageCounter::new();

        assert!(!counter.record(&id, 1));
        assert_eq!(counter.get(&id), VisitState::SeenOnce);

        assert!(counter.record(&id, 1));
        assert_eq!(counter.get(&id), VisitState::Expanded);

        assert!(!counter.record(&id, 1));
        assert_eq!(counter.get(&id).count(), 2);
    }

    #[test]
    fn two_arrivals_at_once_expand() {
        let id = NodeId::from("m");
        let mut counter = AverageCounter::new();
        assert!(counter.record(&id, 2));
        assert!(!counter.record(&id, 2));
    }
}
