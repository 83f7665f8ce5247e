use super::GeoPoint;

/// Ordered perimeter of a farm
///
/// No convexity or simplicity is assumed. Self-intersecting boundaries are
/// accepted as-is; operations on them give unspecified (but finite) results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryPolygon {
    pub vertices: Vec<GeoPoint>,
}

impl BoundaryPolygon {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    /// Build a boundary from raw sensor readings
    ///
    /// Drops non-finite readings and a closing vertex that repeats the first
    /// one, since sections are built from an implicitly closed ring.
    pub fn from_readings(readings: impl IntoIterator<Item = GeoPoint>) -> Self {
        let mut vertices: Vec<GeoPoint> = readings.into_iter().filter(|p| p.is_finite()).collect();

        if is_closed_ring(&vertices) {
            vertices.pop();
        }

        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// At least 3 vertices, the minimum for an interior
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    pub fn centroid(&self) -> Option<GeoPoint> {
        super::point::centroid(&self.vertices)
    }
}

fn is_closed_ring(points: &[GeoPoint]) -> bool {
    if points.len() < 4 {
        return false;
    }
    let first = points[0];
    let last = points[points.len() - 1];
    (first.latitude - last.latitude).abs() < 1e-12
        && (first.longitude - last.longitude).abs() < 1e-12
}
