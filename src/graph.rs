//! Undirected road graph over canonical node ids.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use tracing::debug;

use crate::merge::MergeMap;
use crate::models::{NodeId, Way};

/// Adjacency structure built from road ways. Symmetric by construction:
/// every edge is recorded in both directions. Neighbor sets are ordered so
/// traversals are deterministic.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    adjacency: HashMap<NodeId, BTreeSet<NodeId>>,
}

impl RoadGraph {
    /// Connect the canonical ids of every pair of consecutive nodes within
    /// each way. Ways with fewer than 2 nodes contribute no edges.
    pub fn build(ways: &[Way], merges: &MergeMap) -> Self {
        let mut adjacency: HashMap<NodeId, BTreeSet<NodeId>> = HashMap::new();
        for way in ways {
            for pair in way.nodes.windows(2) {
                let a = merges.resolve(pair[0]);
                let b = merges.resolve(pair[1]);
                adjacency.entry(a).or_default().insert(b);
                adjacency.entry(b).or_default().insert(a);
            }
        }
        debug!("Road graph has {} vertices", adjacency.len());
        Self { adjacency }
    }

    /// All vertices, sorted by id.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.adjacency.keys().copied().collect();
        nodes.sort();
        nodes
    }

    /// Neighbors of `id` in ascending order; empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_is_symmetric() {
        let ways = vec![
            Way::new(1, vec![NodeId(1), NodeId(2), NodeId(3)]),
            Way::new(2, vec![NodeId(3), NodeId(4)]),
        ];
        let graph = RoadGraph::build(&ways, &MergeMap::new());
        for node in graph.nodes() {
            for neighbor in graph.neighbors(node) {
                assert!(
                    graph.neighbors(neighbor).any(|n| n == node),
                    "edge {node}->{neighbor} has no reverse"
                );
            }
        }
    }

    #[test]
    fn test_short_ways_contribute_nothing() {
        let ways = vec![Way::new(1, vec![NodeId(7)]), Way::new(2, vec![])];
        let graph = RoadGraph::build(&ways, &MergeMap::new());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_edges_use_canonical_ids() {
        let mut merges = MergeMap::new();
        merges.link(NodeId(2), NodeId(1));
        let ways = vec![Way::new(1, vec![NodeId(2), NodeId(3)])];
        let graph = RoadGraph::build(&ways, &merges);
        assert!(!graph.contains(NodeId(2)));
        assert_eq!(graph.neighbors(NodeId(1)).collect::<Vec<_>>(), vec![NodeId(3)]);
        assert_eq!(graph.neighbors(NodeId(3)).collect::<Vec<_>>(), vec![NodeId(1)]);
    }
}
