//! The block output type.

use serde::{Deserialize, Serialize};

use super::{GeoPoint, NodeId, PixelPoint};

/// A deduplicated, filtered ring of the road graph, approximating one face
/// of the planar subdivision the roads induce (a city block).
///
/// Carried in three parallel representations of equal length, aligned
/// index-for-index: node ids, geographic points, and discrete pixel points.
/// The closing edge back to the first entry is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub nodes: Vec<NodeId>,
    pub geo: Vec<GeoPoint>,
    pub pixel: Vec<PixelPoint>,
}

impl Block {
    pub fn new(nodes: Vec<NodeId>, geo: Vec<GeoPoint>, pixel: Vec<PixelPoint>) -> Self {
        debug_assert!(nodes.len() == geo.len() && geo.len() == pixel.len());
        Self { nodes, geo, pixel }
    }

    /// Number of vertices (identical across all three representations).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let block = Block::new(
            vec![NodeId(1), NodeId(2), NodeId(3)],
            vec![
                GeoPoint::new(47.0, 8.0),
                GeoPoint::new(47.1, 8.0),
                GeoPoint::new(47.1, 8.1),
            ],
            vec![
                PixelPoint::new(0, 0),
                PixelPoint::new(10, 0),
                PixelPoint::new(10, 10),
            ],
        );
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
