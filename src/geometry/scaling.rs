use serde::Serialize;

use crate::domain::GeoPoint;

/// Fraction of each axis span added on both sides before fitting the canvas
pub const PADDING_FRACTION: f64 = 0.1;

/// Smallest span (degrees) an axis may have; flat boundaries are widened to it
pub const MIN_SPAN_DEGREES: f64 = 1e-6;

/// Bounding box in geographic degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Create bounds from a set of points, ignoring non-finite readings
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let mut finite = points.iter().filter(|p| p.is_finite()).peekable();
        finite.peek()?;

        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;

        for p in finite {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lon = min_lon.min(p.longitude);
            max_lon = max_lon.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    /// Longitude span
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Grow each side by `fraction` of the axis span
    ///
    /// Axes narrower than [`MIN_SPAN_DEGREES`] are first widened around their
    /// midpoint so the padded box never collapses.
    pub fn padded(&self, fraction: f64) -> Self {
        let (min_lat, max_lat) = widen(self.min_lat, self.max_lat);
        let (min_lon, max_lon) = widen(self.min_lon, self.max_lon);
        let pad_lat = (max_lat - min_lat) * fraction;
        let pad_lon = (max_lon - min_lon) * fraction;

        Self {
            min_lat: min_lat - pad_lat,
            max_lat: max_lat + pad_lat,
            min_lon: min_lon - pad_lon,
            max_lon: max_lon + pad_lon,
        }
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if max - min >= MIN_SPAN_DEGREES {
        return (min, max);
    }
    let mid = (min + max) / 2.0;
    (mid - MIN_SPAN_DEGREES / 2.0, mid + MIN_SPAN_DEGREES / 2.0)
}

/// A point on the drawing surface; y grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// Affine map from padded geographic bounds onto a canvas
///
/// Preserves the box aspect ratio and ordering along each axis. Not an
/// equal-area or conformal projection; fine at single-farm scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasProjection {
    bounds: Bounds,
    width: f64,
    height: f64,
}

impl CanvasProjection {
    /// Fit the valid points onto a canvas at most `max_width` wide
    ///
    /// Height follows from the aspect ratio; if it exceeds `max_height_cap` the
    /// height is capped and the width shrinks to match. Returns `None` when
    /// fewer than 3 finite points are available.
    pub fn fit(points: &[GeoPoint], max_width: f64, max_height_cap: f64) -> Option<Self> {
        if points.iter().filter(|p| p.is_finite()).count() < 3 {
            return None;
        }

        let bounds = Bounds::from_points(points)?.padded(PADDING_FRACTION);
        let ratio = bounds.width() / bounds.height();

        let mut width = max_width;
        let mut height = max_width / ratio;
        if height > max_height_cap {
            height = max_height_cap;
            width = max_height_cap * ratio;
        }

        Some(Self {
            bounds,
            width,
            height,
        })
    }

    /// Project one reading onto the canvas, north at the top
    pub fn project(&self, point: &GeoPoint) -> NormalizedPoint {
        let x = (point.longitude - self.bounds.min_lon) / self.bounds.width() * self.width;
        let y = self.height
            - (point.latitude - self.bounds.min_lat) / self.bounds.height() * self.height;
        NormalizedPoint { x, y }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Padded bounds the canvas was fitted to
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

/// Boundary points projected onto a canvas
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedMap {
    pub points: Vec<NormalizedPoint>,
    pub width: f64,
    pub height: f64,
}

impl NormalizedMap {
    /// True when there was nothing to draw
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Project boundary readings onto a canvas of bounded size
///
/// Non-finite readings are skipped. With fewer than 3 valid readings the
/// result is empty with zero dimensions.
pub fn normalize(points: &[GeoPoint], max_width: f64, max_height_cap: f64) -> NormalizedMap {
    let Some(projection) = CanvasProjection::fit(points, max_width, max_height_cap) else {
        return NormalizedMap::default();
    };

    NormalizedMap {
        points: points
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| projection.project(p))
            .collect(),
        width: projection.width(),
        height: projection.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(lat_span: f64, lon_span: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, lon_span),
            GeoPoint::new(lat_span, lon_span),
            GeoPoint::new(lat_span, 0.0),
        ]
    }

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            GeoPoint::new(-27.5, 153.0),
            GeoPoint::new(-27.4, 153.2),
            GeoPoint::new(f64::NAN, 999.0),
        ];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_lat, -27.5);
        assert_eq!(bounds.max_lat, -27.4);
        assert_eq!(bounds.min_lon, 153.0);
        assert_eq!(bounds.max_lon, 153.2);
    }

    #[test]
    fn test_bounds_padding() {
        let bounds = Bounds::from_points(&rect(1.0, 2.0)).unwrap().padded(0.1);
        assert!((bounds.min_lat + 0.1).abs() < 1e-12);
        assert!((bounds.max_lat - 1.1).abs() < 1e-12);
        assert!((bounds.min_lon + 0.2).abs() < 1e-12);
        assert!((bounds.max_lon - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_empty_inputs() {
        let p = GeoPoint::new(1.0, 1.0);
        for points in [vec![], vec![p], vec![p, GeoPoint::new(2.0, 2.0)]] {
            let map = normalize(&points, 300.0, 400.0);
            assert!(map.is_empty());
            assert_eq!(map.width, 0.0);
            assert_eq!(map.height, 0.0);
        }
    }

    #[test]
    fn test_normalize_skips_invalid_and_needs_three_valid() {
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(f64::NAN, 1.0),
            GeoPoint::new(1.0, 1.0),
        ];
        assert!(normalize(&points, 300.0, 400.0).is_empty());
    }

    #[test]
    fn test_normalize_drops_invalid_reading_among_valid() {
        let mut points = rect(1.0, 2.0);
        points.insert(2, GeoPoint::new(f64::NAN, 1.0));

        let map = normalize(&points, 300.0, 10_000.0);
        assert_eq!(map.points.len(), 4);
        assert_eq!(map, normalize(&rect(1.0, 2.0), 300.0, 10_000.0));
        assert!(map.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_normalize_preserves_aspect_ratio() {
        // 2:1 width:height box, cap far away
        let map = normalize(&rect(1.0, 2.0), 300.0, 10_000.0);
        assert_eq!(map.points.len(), 4);
        assert!((map.width - 300.0).abs() < 1e-9);
        assert!((map.width / map.height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_caps_height() {
        // 1:4 width:height box would need 1200 high at width 300
        let map = normalize(&rect(4.0, 1.0), 300.0, 400.0);
        assert!((map.height - 400.0).abs() < 1e-9);
        assert!((map.width - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_flips_y_and_pads() {
        let map = normalize(&rect(1.0, 1.0), 120.0, 1000.0);
        // Square box: padding puts the south-west corner at 1/12 of each side
        let sw = map.points[0];
        assert!((sw.x - 10.0).abs() < 1e-9);
        assert!((sw.y - 110.0).abs() < 1e-9);
        // North-east corner near the top right
        let ne = map.points[2];
        assert!((ne.x - 110.0).abs() < 1e-9);
        assert!((ne.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_flat_boundary_stays_finite() {
        let flat = vec![
            GeoPoint::new(5.0, 0.0),
            GeoPoint::new(5.0, 1.0),
            GeoPoint::new(5.0, 2.0),
        ];
        let map = normalize(&flat, 300.0, 400.0);
        assert_eq!(map.points.len(), 3);
        assert!(map.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_projection_orders_axes() {
        let projection = CanvasProjection::fit(&rect(1.0, 1.0), 100.0, 100.0).unwrap();
        let west = projection.project(&GeoPoint::new(0.5, 0.2));
        let east = projection.project(&GeoPoint::new(0.5, 0.8));
        let north = projection.project(&GeoPoint::new(0.9, 0.5));
        assert!(west.x < east.x);
        assert!(north.y < west.y);
    }
}
