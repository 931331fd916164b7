//! cityblocks - extracting city blocks from road-network geometry.
//!
//! Takes road ways (polylines over shared node ids) plus a node coordinate
//! table, merges near-duplicate intersection nodes, walks the resulting
//! undirected graph for small cycles ("rings"), and filters them down to a
//! set of block polygons. Blocks can then be rasterized and other polygons
//! (typically buildings) assigned to the blocks that contain them.
//!
//! Parsing of source map formats, rendering, and persistence live in the
//! callers; this crate is the in-memory computational core.

pub mod blocks;
pub mod config;
pub mod error;
pub mod graph;
pub mod matcher;
pub mod merge;
pub mod models;
pub mod polygon;
pub mod rings;
pub mod transform;

pub use blocks::extract_blocks;
pub use config::PipelineConfig;
pub use error::Error;
pub use models::{
    Block, GeoBounds, GeoPoint, NodeId, NodeTable, PixelBounds, PixelPoint, Way, WayId,
};
