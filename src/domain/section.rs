use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Number of distinct colour tags cycled through by renderers
pub const COLOR_CYCLE: usize = 10;

/// Triangular wedge of a boundary: (centroid, vertex_a, vertex_b)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Section {
    pub index: usize,
    pub vertex_a: GeoPoint,
    pub vertex_b: GeoPoint,
    pub centroid: GeoPoint,
    pub color_tag: u8,
}

impl Section {
    pub fn new(index: usize, vertex_a: GeoPoint, vertex_b: GeoPoint, centroid: GeoPoint) -> Self {
        Self {
            index,
            vertex_a,
            vertex_b,
            centroid,
            color_tag: (index % COLOR_CYCLE) as u8,
        }
    }

    /// Corners in barycentric order: centroid, vertex_a, vertex_b
    pub fn corners(&self) -> [GeoPoint; 3] {
        [self.centroid, self.vertex_a, self.vertex_b]
    }
}

/// Representative observation location for one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub section_index: usize,
    pub label: String,
}

impl SampledPoint {
    pub fn new(point: GeoPoint, section_index: usize) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
            section_index,
            label: format!("Section {} Point", section_index + 1),
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
