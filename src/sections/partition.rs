use crate::domain::{BoundaryPolygon, GeoPoint, Section};
use crate::error::GeometryError;

/// Split a boundary into triangular wedges around its centroid
///
/// # Algorithm
/// 1. Centroid = mean of all vertices
/// 2. Stable sort of vertices by `atan2(dlon, dlat)` around the centroid,
///    which walks clockwise starting from south. Equal angles keep input order.
/// 3. One wedge per consecutive pair, wrapping around
/// 4. With more wedges than requested, keep `floor(i * n / desired)` so the
///    kept wedges spread around the whole boundary
///
/// Wedge `index` is the position in the returned list. Requesting zero
/// sections returns an empty list.
pub fn partition(
    polygon: &BoundaryPolygon,
    desired_sections: usize,
) -> Result<Vec<Section>, GeometryError> {
    let n = polygon.len();
    let centroid = match polygon.centroid() {
        Some(c) if n >= 3 => c,
        _ => return Err(GeometryError::insufficient(n)),
    };

    let sorted = sort_by_bearing(&polygon.vertices, &centroid);

    let wedges: Vec<(GeoPoint, GeoPoint)> = (0..n)
        .map(|i| (sorted[i], sorted[(i + 1) % n]))
        .collect();

    let selected: Vec<(GeoPoint, GeoPoint)> = if n > desired_sections {
        (0..desired_sections)
            .map(|i| wedges[i * n / desired_sections])
            .collect()
    } else {
        wedges
    };

    Ok(selected
        .into_iter()
        .enumerate()
        .map(|(index, (a, b))| Section::new(index, a, b, centroid))
        .collect())
}

/// Vertices ordered by `atan2(lon - c.lon, lat - c.lat)` ascending
fn sort_by_bearing(vertices: &[GeoPoint], centroid: &GeoPoint) -> Vec<GeoPoint> {
    let mut keyed: Vec<(f64, GeoPoint)> = vertices
        .iter()
        .map(|p| {
            let angle = (p.longitude - centroid.longitude).atan2(p.latitude - centroid.latitude);
            (angle, *p)
        })
        .collect();

    // sort_by is stable
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}
