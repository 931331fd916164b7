//! Linear projection from geographic to pixel coordinates.

use crate::error::Error;
use crate::models::{GeoBounds, GeoPoint, PixelBounds, PixelPoint};

/// Maps geographic points into a pixel space, linearly per axis.
///
/// With `flip_y` enabled (the display convention), the maximum latitude
/// maps to y = 0 so that (0, 0) is the top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    geo: GeoBounds,
    pixel: PixelBounds,
    flip_y: bool,
}

impl Projection {
    /// Build a projection, rejecting bounds with a zero or inverted range
    /// on either axis so the division below can never produce NaN or
    /// infinity.
    pub fn new(geo: GeoBounds, pixel: PixelBounds, flip_y: bool) -> Result<Self, Error> {
        if !(geo.lat_range() > 0.0) {
            return Err(Error::DegenerateBounds {
                axis: "latitude",
                min: geo.min_lat,
                max: geo.max_lat,
            });
        }
        if !(geo.lon_range() > 0.0) {
            return Err(Error::DegenerateBounds {
                axis: "longitude",
                min: geo.min_lon,
                max: geo.max_lon,
            });
        }
        Ok(Self {
            geo,
            pixel,
            flip_y,
        })
    }

    pub fn project_point(&self, p: GeoPoint) -> (f64, f64) {
        let x = (p.lon - self.geo.min_lon) / self.geo.lon_range() * self.pixel.width as f64;
        let y = if self.flip_y {
            (self.geo.max_lat - p.lat) / self.geo.lat_range() * self.pixel.height as f64
        } else {
            (p.lat - self.geo.min_lat) / self.geo.lat_range() * self.pixel.height as f64
        };
        (x, y)
    }

    pub fn project(&self, points: &[GeoPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.project_point(p)).collect()
    }

    /// Truncating variant producing discrete pixel coordinates. Flooring
    /// keeps near-coincident float results on the same pixel.
    pub fn project_pixels(&self, points: &[GeoPoint]) -> Vec<PixelPoint> {
        points
            .iter()
            .map(|&p| {
                let (x, y) = self.project_point(p);
                PixelPoint::new(x.floor() as i64, y.floor() as i64)
            })
            .collect()
    }

    /// Project a list of polygons into discrete pixel space.
    pub fn project_polygons(&self, polygons: &[Vec<GeoPoint>]) -> Vec<Vec<PixelPoint>> {
        polygons.iter().map(|p| self.project_pixels(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GeoBounds {
        GeoBounds::new(0.0, 0.0, 1.0, 2.0)
    }

    #[test]
    fn test_projection_is_linear() {
        let proj = Projection::new(bounds(), PixelBounds::new(200, 100), false).unwrap();
        assert_eq!(proj.project_point(GeoPoint::new(0.0, 0.0)), (0.0, 0.0));
        assert_eq!(proj.project_point(GeoPoint::new(1.0, 2.0)), (200.0, 100.0));
        assert_eq!(proj.project_point(GeoPoint::new(0.5, 1.0)), (100.0, 50.0));
    }

    #[test]
    fn test_flip_y() {
        let proj = Projection::new(bounds(), PixelBounds::new(200, 100), true).unwrap();
        // max latitude lands at the top of the image
        assert_eq!(proj.project_point(GeoPoint::new(1.0, 0.0)), (0.0, 0.0));
        assert_eq!(proj.project_point(GeoPoint::new(0.0, 0.0)), (0.0, 100.0));
    }

    #[test]
    fn test_pixel_variant_floors() {
        let proj = Projection::new(bounds(), PixelBounds::new(200, 100), false).unwrap();
        let pixels = proj.project_pixels(&[GeoPoint::new(0.999, 1.999)]);
        assert_eq!(pixels, vec![PixelPoint::new(199, 99)]);
    }

    #[test]
    fn test_zero_lat_range_is_rejected() {
        let geo = GeoBounds::new(5.0, 0.0, 5.0, 1.0);
        let err = Projection::new(geo, PixelBounds::square(100), true).unwrap_err();
        assert!(matches!(err, Error::DegenerateBounds { axis: "latitude", .. }));
    }

    #[test]
    fn test_zero_lon_range_is_rejected() {
        let geo = GeoBounds::new(0.0, 3.0, 1.0, 3.0);
        let err = Projection::new(geo, PixelBounds::square(100), true).unwrap_err();
        assert!(matches!(err, Error::DegenerateBounds { axis: "longitude", .. }));
    }
}
