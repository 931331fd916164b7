//! Point-in-polygon testing, polygon containment, and rasterization.

use serde::{Deserialize, Serialize};

use crate::models::PixelPoint;

/// Even-odd (crossing number) point-in-polygon test.
///
/// The polygon is implicitly closed. An edge is a crossing candidate
/// exactly when one endpoint's y lies strictly below the query y and the
/// other's lies at or above it; the asymmetry avoids double-counting at
/// vertex heights. Horizontal edges (including degenerate zero-length
/// edges from duplicate consecutive vertices) never qualify, so the
/// interpolation below never divides by zero.
///
/// Boundary convention: a point on the polygon's lowest edge tests
/// outside, since no edge dips strictly below its y. This choice is
/// arbitrary but deterministic; callers that need boundary vertices to
/// count should use [`polygon_contains`].
pub fn point_in_polygon(polygon: &[PixelPoint], point: PixelPoint) -> bool {
    if polygon.is_empty() {
        return false;
    }
    let x = point.x as f64;
    let y = point.y as f64;

    let mut inside = false;
    let mut prev = polygon[polygon.len() - 1];
    for &vertex in polygon {
        let (vx, vy) = (vertex.x as f64, vertex.y as f64);
        let (px, py) = (prev.x as f64, prev.y as f64);
        if (vy < y && py >= y) || (py < y && vy >= y) {
            // x-intercept of the edge at the query height
            if vx + (y - vy) / (py - vy) * (px - vx) < x {
                inside = !inside;
            }
        }
        prev = vertex;
    }
    inside
}

/// Approximate test of whether `container` contains `candidate`: every
/// candidate vertex must either coincide with a container vertex or test
/// inside it.
///
/// The vertex-coincidence clause matters for block filtering: an outer
/// loop around a block runs through the very same pixel vertices as the
/// block itself, and those land on the boundary, which the even-odd rule
/// counts as outside.
///
/// Candidate edges are never checked against the container boundary, so a
/// spiky container can produce false positives. That per-vertex
/// approximation is intentional.
pub fn polygon_contains(container: &[PixelPoint], candidate: &[PixelPoint]) -> bool {
    candidate
        .iter()
        .all(|p| container.contains(p) || point_in_polygon(container, *p))
}

/// Row ordering of a produced raster grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RasterOrientation {
    /// Row 0 holds the highest y, matching image/display conventions.
    #[default]
    TopDown,
    /// Row 0 holds y = 0.
    BottomUp,
}

/// A square boolean membership grid for one polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    resolution: usize,
    orientation: RasterOrientation,
    rows: Vec<Vec<bool>>,
}

impl Raster {
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn orientation(&self) -> RasterOrientation {
        self.orientation
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Membership at polygon-space coordinates, independent of row order.
    pub fn get(&self, x: usize, y: usize) -> bool {
        let row = match self.orientation {
            RasterOrientation::TopDown => self.resolution - 1 - y,
            RasterOrientation::BottomUp => y,
        };
        self.rows[row][x]
    }

    /// Debug rendering, one `+`/`.` cell per pixel.
    pub fn to_ascii(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&inside| if inside { "+" } else { "." })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Brute-force rasterization: test every cell of an RxR grid against the
/// polygon. Coordinates are assumed to lie within `[0, resolution)`.
///
/// O(R^2 * n) per polygon, acceptable for resolutions in the hundreds. A
/// scan-line algorithm would be needed beyond that; this is a known
/// limitation, not an oversight.
pub fn rasterize(
    polygon: &[PixelPoint],
    resolution: usize,
    orientation: RasterOrientation,
) -> Raster {
    let ys: Vec<usize> = match orientation {
        RasterOrientation::TopDown => (0..resolution).rev().collect(),
        RasterOrientation::BottomUp => (0..resolution).collect(),
    };
    let rows = ys
        .into_iter()
        .map(|y| {
            (0..resolution)
                .map(|x| point_in_polygon(polygon, PixelPoint::new(x as i64, y as i64)))
                .collect()
        })
        .collect();
    Raster {
        resolution,
        orientation,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(points: &[(i64, i64)]) -> Vec<PixelPoint> {
        points.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect()
    }

    fn triangle() -> Vec<PixelPoint> {
        poly(&[(0, 0), (50, 100), (100, 0)])
    }

    #[test]
    fn test_point_inside_triangle() {
        assert!(point_in_polygon(&triangle(), PixelPoint::new(50, 50)));
    }

    #[test]
    fn test_point_outside_triangle() {
        assert!(!point_in_polygon(&triangle(), PixelPoint::new(0, 100)));
    }

    #[test]
    fn test_point_on_bottom_edge_is_outside() {
        // documented boundary convention: no edge dips strictly below y=0
        assert!(!point_in_polygon(&triangle(), PixelPoint::new(50, 0)));
    }

    #[test]
    fn test_duplicate_consecutive_vertices_do_not_panic() {
        let degenerate = poly(&[(0, 0), (0, 0), (50, 100), (100, 0)]);
        assert!(point_in_polygon(&degenerate, PixelPoint::new(50, 50)));
        assert!(!point_in_polygon(&degenerate, PixelPoint::new(0, 100)));
    }

    #[test]
    fn test_empty_polygon_contains_nothing() {
        assert!(!point_in_polygon(&[], PixelPoint::new(0, 0)));
    }

    #[test]
    fn test_contains_rejects_single_outside_vertex() {
        let container = poly(&[(0, 0), (100, 0), (100, 100), (0, 100)]);
        let mostly_inside = poly(&[(10, 10), (150, 10), (20, 20)]);
        assert!(!polygon_contains(&container, &mostly_inside));
    }

    #[test]
    fn test_contains_accepts_shared_vertices() {
        // the literal encompassing-block pair from production data: every
        // inner vertex is also a vertex of the outer loop
        let outer = poly(&[
            (187, 27),
            (183, 27),
            (175, 27),
            (159, 27),
            (153, 27),
            (148, 27),
            (149, 108),
            (183, 108),
            (217, 108),
            (217, 27),
        ]);
        let inner = poly(&[
            (148, 27),
            (153, 27),
            (159, 27),
            (175, 27),
            (183, 27),
            (183, 108),
            (149, 108),
        ]);
        assert!(polygon_contains(&outer, &inner));
        assert!(!polygon_contains(&inner, &outer));
    }

    #[test]
    fn test_raster_matches_point_in_polygon() {
        let tri = poly(&[(0, 0), (10, 19), (19, 0)]);
        for orientation in [RasterOrientation::TopDown, RasterOrientation::BottomUp] {
            let raster = rasterize(&tri, 20, orientation);
            for y in 0..20 {
                for x in 0..20 {
                    assert_eq!(
                        raster.get(x, y),
                        point_in_polygon(&tri, PixelPoint::new(x as i64, y as i64)),
                        "cell ({x}, {y}) disagrees"
                    );
                }
            }
        }
    }

    #[test]
    fn test_raster_row_order() {
        // small wedge occupying the lower-left corner
        let wedge = poly(&[(0, 0), (0, 2), (2, 0)]);
        let top_down = rasterize(&wedge, 3, RasterOrientation::TopDown);
        let bottom_up = rasterize(&wedge, 3, RasterOrientation::BottomUp);
        let mut reversed = top_down.rows().to_vec();
        reversed.reverse();
        assert_eq!(reversed, bottom_up.rows());
    }

    #[test]
    fn test_ascii_rendering() {
        let raster = rasterize(&poly(&[(0, 0), (0, 2), (2, 0)]), 2, RasterOrientation::BottomUp);
        let ascii = raster.to_ascii();
        assert_eq!(ascii.lines().count(), 2);
        assert!(ascii.contains('+'));
        assert!(ascii.contains('.'));
    }
}
