//! Merging near-duplicate road nodes.
//!
//! Source data often carries several distinct node ids for what is
//! geometrically one intersection. This module clusters them by recording
//! merge links in a [`MergeMap`] and resolving every id to its canonical
//! representative before use.

use hashbrown::HashSet;
use tracing::info;

use crate::error::Error;
use crate::models::{NodeId, NodeTable, Way};

/// A chain map from node id to node id. The terminal id of a chain is the
/// canonical representative. Links are only ever added between current
/// canonical ids, which keeps the map acyclic.
#[derive(Debug, Clone, Default)]
pub struct MergeMap {
    links: hashbrown::HashMap<NodeId, NodeId>,
}

impl MergeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the chain from `id` to its canonical representative. Resolving
    /// an already-canonical id returns it unchanged.
    pub fn resolve(&self, mut id: NodeId) -> NodeId {
        while let Some(&next) = self.links.get(&id) {
            id = next;
        }
        id
    }

    /// Record that `from` is subsumed by `to`. Both must be canonical at
    /// the time of the call.
    pub fn link(&mut self, from: NodeId, to: NodeId) {
        debug_assert_ne!(from, to);
        self.links.insert(from, to);
    }

    /// Number of merge links (nodes subsumed by another node).
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Unique node ids across all ways, in first-seen order. This fixed
/// enumeration order makes merge tie-breaking deterministic.
pub fn collect_road_nodes(ways: &[Way]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    for way in ways {
        for &id in &way.nodes {
            if seen.insert(id) {
                nodes.push(id);
            }
        }
    }
    nodes
}

/// Merge every pair of nodes whose canonical representatives lie strictly
/// closer than `threshold` in lat/lon space.
///
/// All unordered pairs are considered, O(n^2). Both ids are resolved
/// through the map before each comparison, so distances are measured
/// against the current canonical point and clusters collapse onto one
/// representative. A threshold of 0 degenerates to the identity map.
pub fn merge_nearby_nodes(
    node_ids: &[NodeId],
    table: &NodeTable,
    threshold: f64,
) -> Result<MergeMap, Error> {
    info!("{} road nodes before merging", node_ids.len());

    let mut merges = MergeMap::new();
    for i in 0..node_ids.len() {
        for j in (i + 1)..node_ids.len() {
            let id_i = merges.resolve(node_ids[i]);
            let id_j = merges.resolve(node_ids[j]);
            if id_i == id_j {
                continue;
            }
            let dist = table.point(id_i)?.distance(&table.point(id_j)?);
            if dist < threshold {
                merges.link(id_j, id_i);
            }
        }
    }

    info!(
        "{} road nodes after merging",
        node_ids.len() - merges.len()
    );
    Ok(merges)
}
