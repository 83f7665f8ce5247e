use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::domain::{BoundaryPolygon, GeoPoint, centroid};

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read boundary file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed boundary JSON")]
    Json(#[from] serde_json::Error),
}

/// One photographed boundary waypoint as stored by the capture screen
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryRecord {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_uri: Option<String>,
}

impl BoundaryRecord {
    fn reading(&self) -> Option<GeoPoint> {
        let point = GeoPoint::new(self.latitude?, self.longitude?);
        point.is_finite().then_some(point)
    }
}

/// Either a bare list of records or a farm envelope around one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoundaryFile {
    Farm {
        #[serde(default)]
        farm_id: Option<u64>,
        points: Vec<BoundaryRecord>,
    },
    Records(Vec<BoundaryRecord>),
}

/// Result of parsing a boundary capture
#[derive(Debug, Clone)]
pub struct CaptureReport {
    pub farm_id: Option<u64>,
    pub boundary: BoundaryPolygon,
    /// Records with missing or non-finite coordinates
    pub dropped: usize,
    /// Records read from the file, dropped ones included
    pub total: usize,
}

/// Parse boundary capture JSON into a boundary polygon
///
/// # Algorithm
/// 1. Accept `[{latitude, longitude, ...}]` or `{farm_id, points: [...]}`
/// 2. Drop records lacking a finite latitude or longitude, counting them
/// 3. Build the boundary, dropping a duplicated closing vertex
pub fn parse_boundary_json(json: &str) -> Result<CaptureReport, CaptureError> {
    let (farm_id, records) = match serde_json::from_str::<BoundaryFile>(json)? {
        BoundaryFile::Farm { farm_id, points } => (farm_id, points),
        BoundaryFile::Records(records) => (None, records),
    };

    let readings: Vec<GeoPoint> = records.iter().filter_map(BoundaryRecord::reading).collect();
    let dropped = records.len() - readings.len();
    if dropped > 0 {
        warn!(dropped, total = records.len(), "skipping invalid boundary readings");
    }

    Ok(CaptureReport {
        farm_id,
        boundary: BoundaryPolygon::from_readings(readings),
        dropped,
        total: records.len(),
    })
}

/// Read and parse a boundary capture file
pub fn load_boundary(path: &Path) -> Result<CaptureReport, CaptureError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CaptureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_boundary_json(&contents)
}

/// Order markers around their centroid the way the boundary editor draws them
///
/// Sorts by `atan2(dlat, dlon)`, i.e. counter-clockwise from west. Fewer than
/// 3 points are returned unchanged.
pub fn sort_around_centroid(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let Some(c) = centroid(points).filter(|_| points.len() >= 3) else {
        return points.to_vec();
    };

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        let angle_a = (a.latitude - c.latitude).atan2(a.longitude - c.longitude);
        let angle_b = (b.latitude - c.latitude).atan2(b.longitude - c.longitude);
        angle_a.total_cmp(&angle_b)
    });
    sorted
}
