//! Ring discovery: bounded breadth-first search for small cycles.
//!
//! For a given start node, the search accumulates paths to every reachable
//! node within a length bound, keeping only paths whose interiors are
//! pairwise disjoint. Any node reached by two such paths closes a ring
//! through the start node.
//!
//! This is a heuristic approximation of minimal-face enumeration: it is not
//! guaranteed to find every face nor the minimal cycle, and raising the
//! bound trades completeness for quadratic cost growth. That trade-off is
//! deliberate.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::graph::RoadGraph;
use crate::models::NodeId;

/// The nodes of a path excluding its first and last.
fn interior(path: &[NodeId]) -> &[NodeId] {
    if path.len() < 3 {
        &[]
    } else {
        &path[1..path.len() - 1]
    }
}

/// Whether `path` adds new information about routes to its endpoint, given
/// the paths already accepted for that endpoint.
///
/// A length-2 path competing with an existing one signals a duplicate
/// direct edge and is non-informative for ring detection. Longer paths are
/// accepted only if their interior shares no node with the interior of any
/// accepted path.
fn admits(path: &[NodeId], accepted: &[Vec<NodeId>]) -> bool {
    debug_assert!(path.len() >= 2, "only the seed path may have length 1");
    if path.len() == 2 {
        return false;
    }
    let middle: HashSet<NodeId> = interior(path).iter().copied().collect();
    accepted
        .iter()
        .all(|existing| interior(existing).iter().all(|n| !middle.contains(n)))
}

/// Find rings through `start` discoverable within `max_path_len` nodes.
///
/// Each returned ring is an ordered node list beginning at `start`, the
/// closing edge implicit. Rings are synthesized from the first two accepted
/// paths to a node: `p1` followed by the reversed interior of `p2`.
pub fn find_rings_at(
    graph: &RoadGraph,
    start: NodeId,
    max_path_len: usize,
) -> Vec<Vec<NodeId>> {
    let mut accepted: HashMap<NodeId, Vec<Vec<NodeId>>> = HashMap::new();
    // first-acceptance order, so ring output does not depend on map order
    let mut order: Vec<NodeId> = Vec::new();

    let mut queue: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::new();
    queue.push_back((start, vec![start]));

    // FIFO order guarantees shorter paths are considered before longer
    // ones to the same node.
    while let Some((cur, path)) = queue.pop_front() {
        match accepted.get_mut(&cur) {
            None => {
                order.push(cur);
                accepted.insert(cur, vec![path.clone()]);
            }
            Some(paths) => {
                if admits(&path, paths) {
                    paths.push(path.clone());
                }
            }
        }

        if path.len() < max_path_len {
            for neighbor in graph.neighbors(cur) {
                // no backtracking within a single walk
                if !path.contains(&neighbor) {
                    let mut extended = path.clone();
                    extended.push(neighbor);
                    queue.push_back((neighbor, extended));
                }
            }
        }
    }

    let mut rings = Vec::new();
    for node in order {
        let paths = &accepted[&node];
        if paths.len() > 1 {
            let p1 = &paths[0];
            let p2 = &paths[1];
            let mut ring = p1.clone();
            ring.extend(interior(p2).iter().rev().copied());
            rings.push(ring);
        }
    }
    rings
}
