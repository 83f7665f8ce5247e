use geo::{Area, BooleanOps, Contains, LineString, Point, Polygon, Rect, coord};
use serde::Serialize;

use crate::domain::{BoundaryPolygon, GeoPoint};
use crate::error::GeometryError;
use crate::geometry::Bounds;

/// Grid resolution used when a strip's centre falls outside the boundary
const SEARCH_GRID: usize = 5;

/// Vertical slice of a boundary with at most one marker inside it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strip {
    /// 1-based position from west to east among all strips, skipped ones included
    pub segment: usize,
    pub outline: Vec<GeoPoint>,
    pub marker: Option<GeoPoint>,
}

/// Cut a boundary into `count` equal-width north-south strips
///
/// Each strip is the boundary clipped to one slice of its bounding box. When
/// a clip splits into several pieces the largest is kept; slices that clip to
/// nothing usable are skipped. Markers sit at the slice centre when it lies
/// inside the clipped piece, otherwise at the first inside point of a 5x5
/// offset grid around it.
pub fn slice_strips(polygon: &BoundaryPolygon, count: usize) -> Result<Vec<Strip>, GeometryError> {
    if !polygon.is_valid() {
        return Err(GeometryError::insufficient(polygon.len()));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let bounds = Bounds::from_points(&polygon.vertices)
        .ok_or_else(|| GeometryError::insufficient(0))?;
    let shape = to_geo_polygon(&polygon.vertices);
    let slice_width = bounds.width() / count as f64;

    let mut strips = Vec::new();
    for i in 0..count {
        let west = bounds.min_lon + i as f64 * slice_width;
        let east = bounds.min_lon + (i + 1) as f64 * slice_width;
        let slice = Rect::new(
            coord! { x: west, y: bounds.min_lat },
            coord! { x: east, y: bounds.max_lat },
        )
        .to_polygon();

        let Some(piece) = largest_piece(shape.intersection(&slice).0) else {
            continue;
        };
        let outline = from_geo_polygon(&piece);
        if distinct_count(&outline) < 3 {
            continue;
        }

        let center = GeoPoint::new(
            (bounds.min_lat + bounds.max_lat) / 2.0,
            (west + east) / 2.0,
        );
        let marker = find_marker(&piece, center, slice_width, bounds.height());

        strips.push(Strip {
            segment: i + 1,
            outline,
            marker,
        });
    }

    Ok(strips)
}

fn find_marker(
    piece: &Polygon<f64>,
    center: GeoPoint,
    width: f64,
    height: f64,
) -> Option<GeoPoint> {
    let inside = |p: &GeoPoint| piece.contains(&Point::new(p.longitude, p.latitude));

    if inside(&center) {
        return Some(center);
    }

    (0..SEARCH_GRID * SEARCH_GRID)
        .map(|attempt| {
            let step = SEARCH_GRID as f64;
            let offset_lon = (attempt % SEARCH_GRID) as f64 * (width / step) - width / 2.0;
            let offset_lat = (attempt / SEARCH_GRID) as f64 * (height / step) - height / 2.0;
            GeoPoint::new(center.latitude + offset_lat, center.longitude + offset_lon)
        })
        .find(inside)
}

fn largest_piece(pieces: Vec<Polygon<f64>>) -> Option<Polygon<f64>> {
    pieces
        .into_iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
}

fn to_geo_polygon(points: &[GeoPoint]) -> Polygon<f64> {
    let ring: LineString<f64> = points
        .iter()
        .map(|p| coord! { x: p.longitude, y: p.latitude })
        .collect();
    Polygon::new(ring, vec![])
}

fn from_geo_polygon(polygon: &Polygon<f64>) -> Vec<GeoPoint> {
    let mut outline: Vec<GeoPoint> = polygon
        .exterior()
        .coords()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect();
    // geo rings repeat the first coordinate at the end
    if outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    outline
}

fn distinct_count(points: &[GeoPoint]) -> usize {
    let mut distinct: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.contains(p) {
            distinct.push(*p);
        }
    }
    distinct.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::is_point_in_polygon;

    fn rectangle() -> BoundaryPolygon {
        BoundaryPolygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 4.0),
            GeoPoint::new(1.0, 4.0),
            GeoPoint::new(1.0, 0.0),
        ])
    }

    #[test]
    fn test_slice_rectangle_into_four() {
        let strips = slice_strips(&rectangle(), 4).unwrap();
        assert_eq!(strips.len(), 4);

        for (i, strip) in strips.iter().enumerate() {
            assert_eq!(strip.segment, i + 1);
            let marker = strip.marker.unwrap();
            assert!((marker.longitude - (i as f64 + 0.5)).abs() < 1e-9);
            assert!((marker.latitude - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_markers_inside_concave_boundary() {
        // L shape: the strip centres on the east side fall outside
        let boundary = BoundaryPolygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 3.0),
            GeoPoint::new(0.5, 3.0),
            GeoPoint::new(0.5, 1.0),
            GeoPoint::new(3.0, 1.0),
            GeoPoint::new(3.0, 0.0),
        ]);
        let strips = slice_strips(&boundary, 3).unwrap();
        assert!(!strips.is_empty());
        for strip in &strips {
            if let Some(marker) = strip.marker {
                assert!(is_point_in_polygon(&marker, &boundary.vertices));
            }
        }
        assert!(strips.iter().any(|s| s.marker.is_some()));
    }

    #[test]
    fn test_slice_requires_three_points() {
        let boundary = BoundaryPolygon::new(vec![GeoPoint::new(0.0, 0.0)]);
        assert_eq!(
            slice_strips(&boundary, 3),
            Err(GeometryError::InsufficientPoints { found: 1 })
        );
    }

    #[test]
    fn test_slice_zero_count() {
        assert!(slice_strips(&rectangle(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_marker_search_reaches_last_offset() {
        // Only the final grid offset (+0.3, +0.3) lands inside
        let piece = to_geo_polygon(&[
            GeoPoint::new(0.25, 0.25),
            GeoPoint::new(0.25, 0.35),
            GeoPoint::new(0.35, 0.35),
            GeoPoint::new(0.35, 0.25),
        ]);
        let marker = find_marker(&piece, GeoPoint::new(0.0, 0.0), 1.0, 1.0).unwrap();
        assert!((marker.latitude - 0.3).abs() < 1e-9);
        assert!((marker.longitude - 0.3).abs() < 1e-9);
    }
}
