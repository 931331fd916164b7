//! Shared data model for the block extraction pipeline.

mod block;
mod geometry;

pub use block::Block;
pub use geometry::{GeoBounds, GeoPoint, NodeId, NodeTable, PixelBounds, PixelPoint, Way, WayId};
