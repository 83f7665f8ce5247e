use serde::Serialize;

use super::Bounds;
use crate::domain::GeoPoint;

/// Zoom margin around the boundary when framing a map view
const REGION_MARGIN: f64 = 1.2;

/// Delta used when the boundary has no extent along an axis
const FALLBACK_DELTA: f64 = 0.01;

/// Map viewport framing a boundary: centre plus full spans in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Frame the finite readings with a 20% margin
    ///
    /// `None` when fewer than 3 finite readings exist.
    pub fn fit(points: &[GeoPoint]) -> Option<Self> {
        if points.iter().filter(|p| p.is_finite()).count() < 3 {
            return None;
        }
        let bounds = Bounds::from_points(points)?;
        let center = bounds.center();

        Some(Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: non_zero(bounds.height() * REGION_MARGIN),
            longitude_delta: non_zero(bounds.width() * REGION_MARGIN),
        })
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (point.latitude - self.latitude).abs() <= self.latitude_delta / 2.0
            && (point.longitude - self.longitude).abs() <= self.longitude_delta / 2.0
    }
}

fn non_zero(delta: f64) -> f64 {
    if delta > 0.0 { delta } else { FALLBACK_DELTA }
}
