use serde::{Deserialize, Serialize};

use crate::domain::{GeoPoint, SampledPoint};
use crate::sections::Strip;

/// Inspection progress of an observation point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObservationStatus {
    #[default]
    Nil,
    Completed,
}

/// Persisted observation location for one section of a farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    pub farm_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// 1-based section number shown to the inspector
    pub segment: usize,
    pub name: String,
    #[serde(default)]
    pub observation_status: ObservationStatus,
    #[serde(default)]
    pub observation_id: Option<u64>,
    #[serde(default)]
    pub inspection_suggestion_id: Option<u64>,
    #[serde(default)]
    pub confidence_level: Option<String>,
    #[serde(default)]
    pub target_entity: Option<String>,
}

impl ObservationPoint {
    pub fn new(farm_id: u64, position: GeoPoint, segment: usize) -> Self {
        Self {
            farm_id,
            latitude: position.latitude,
            longitude: position.longitude,
            segment,
            name: format!("Section {}", segment),
            observation_status: ObservationStatus::Nil,
            observation_id: None,
            inspection_suggestion_id: None,
            confidence_level: None,
            target_entity: None,
        }
    }

    pub fn from_sampled(farm_id: u64, sampled: &SampledPoint) -> Self {
        Self::new(farm_id, sampled.position(), sampled.section_index + 1)
    }

    /// `None` for strips whose marker search found no inside point
    pub fn from_strip(farm_id: u64, strip: &Strip) -> Option<Self> {
        strip
            .marker
            .map(|marker| Self::new(farm_id, marker, strip.segment))
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn is_completed(&self) -> bool {
        self.observation_status == ObservationStatus::Completed
    }

    pub fn complete(&mut self, observation_id: u64) {
        self.observation_status = ObservationStatus::Completed;
        self.observation_id = Some(observation_id);
    }

    pub fn attach_inspection(
        &mut self,
        suggestion_id: u64,
        confidence_level: &str,
        target_entity: &str,
    ) {
        self.inspection_suggestion_id = Some(suggestion_id);
        self.confidence_level = Some(confidence_level.to_string());
        self.target_entity = Some(target_entity.to_string());
    }
}

/// Keep the first point seen for each segment, preserving order
pub fn dedupe(points: Vec<ObservationPoint>) -> Vec<ObservationPoint> {
    let mut seen = std::collections::HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(p.segment))
        .collect()
}
