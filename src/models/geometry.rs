//! Identifiers, points, and bounds in the two coordinate spaces.
//!
//! Geographic (lat/lon) and pixel coordinates are kept in distinct types so
//! they can only be mixed by going through [`crate::transform`].

use geo::{BoundingRect, MultiPoint, Point};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a graph vertex, unique per raw input node before merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub i64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a way in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WayId(pub i64);

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// L2 distance in raw lat/lon space, the metric used for node merging.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// Discrete pixel point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Geographic bounding box of the source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Compute bounds from a point set, for sources that carry no explicit
    /// bounds element. Returns `None` for an empty set.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let points: Vec<Point<f64>> = points.iter().map(|p| Point::new(p.lon, p.lat)).collect();
        let rect = MultiPoint::from(points).bounding_rect()?;
        Some(Self {
            min_lat: rect.min().y,
            min_lon: rect.min().x,
            max_lat: rect.max().y,
            max_lon: rect.max().x,
        })
    }

    pub fn lat_range(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_range(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// Target pixel space dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub width: u32,
    pub height: u32,
}

impl PixelBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square bounds, the shape the rasterizer expects.
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// An ordered polyline of raw node ids. Feature-tag filtering (which ways
/// are roads) is the caller's responsibility; everything handed to this
/// crate is treated as a road.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
}

impl Way {
    pub fn new(id: i64, nodes: Vec<NodeId>) -> Self {
        Self {
            id: WayId(id),
            nodes,
        }
    }
}

/// Lookup from node id to its geographic point.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    points: HashMap<NodeId, GeoPoint>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, point: GeoPoint) {
        self.points.insert(id, point);
    }

    pub fn get(&self, id: NodeId) -> Option<GeoPoint> {
        self.points.get(&id).copied()
    }

    /// Like [`NodeTable::get`], but a missing id is a hard error: a way
    /// referencing an unknown node means the input is malformed.
    pub fn point(&self, id: NodeId) -> Result<GeoPoint, Error> {
        self.points.get(&id).copied().ok_or(Error::MissingNode(id))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(NodeId, GeoPoint)> for NodeTable {
    fn from_iter<T: IntoIterator<Item = (NodeId, GeoPoint)>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
