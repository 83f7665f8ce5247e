use geo::{Area, LineString, Polygon};

use crate::domain::GeoPoint;

/// Meters per degree of latitude (and of longitude at the equator)
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Equirectangular projection from WGS84 to local meters
///
/// - x = (lon - center_lon) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
///
/// Accurate enough for paddocks a few kilometres across, which is all the
/// area summaries need.
#[derive(Debug, Clone)]
pub struct Projector {
    center: GeoPoint,
    cos_lat: f64,
}

impl Projector {
    /// Create a new projector centered at the given reading
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            cos_lat: center.latitude.to_radians().cos(),
        }
    }

    /// Project a reading to local meters, (x east, y north)
    pub fn project(&self, point: &GeoPoint) -> (f64, f64) {
        let x = (point.longitude - self.center.longitude) * self.cos_lat * METERS_PER_DEGREE;
        let y = (point.latitude - self.center.latitude) * METERS_PER_DEGREE;
        (x, y)
    }

    pub fn project_points(&self, points: &[GeoPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

/// Planar area enclosed by a boundary in hectares
///
/// Zero for fewer than 3 vertices. Self-intersecting rings give the
/// unsigned shoelace area, which undercounts lobes of opposite winding.
pub fn area_hectares(vertices: &[GeoPoint]) -> f64 {
    let Some(center) = crate::domain::centroid(vertices) else {
        return 0.0;
    };
    if vertices.len() < 3 {
        return 0.0;
    }

    let projector = Projector::new(center);
    let ring: LineString<f64> = projector.project_points(vertices).into();
    let polygon = Polygon::new(ring, vec![]);

    polygon.unsigned_area() / 10_000.0
}
