//! Persistence for generated observation points
//!
//! Stores are plain values constructed by the caller and passed by reference
//! to whatever needs them; nothing in the geometry core touches them.

pub mod json;
pub mod memory;

use thiserror::Error;

use crate::observation::ObservationPoint;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt observation store entry {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyed storage of observation points per farm
pub trait ObservationStore {
    /// Points stored for the farm, empty when none exist
    fn load(&self, farm_id: u64) -> Result<Vec<ObservationPoint>, StoreError>;

    /// Replace the farm's points
    fn write(&mut self, farm_id: u64, points: &[ObservationPoint]) -> Result<(), StoreError>;

    fn clear(&mut self, farm_id: u64) -> Result<(), StoreError>;

    /// Store points for a farm that has none yet
    ///
    /// A farm that already has points keeps them; those are returned instead.
    fn save(
        &mut self,
        farm_id: u64,
        points: &[ObservationPoint],
    ) -> Result<Vec<ObservationPoint>, StoreError> {
        let existing = self.load(farm_id)?;
        if !existing.is_empty() {
            return Ok(existing);
        }
        self.write(farm_id, points)?;
        self.load(farm_id)
    }
    /// Record the observation taken at one segment
    ///
    /// Returns the farm's points after the update, empty when the farm has
    /// none. An unknown segment leaves the points untouched.
    fn mark_completed(
        &mut self,
        farm_id: u64,
        segment: usize,
        observation_id: u64,
    ) -> Result<Vec<ObservationPoint>, StoreError> {
        let mut points = self.load(farm_id)?;
        if points.is_empty() {
            return Ok(points);
        }

        let mut changed = false;
        for point in points.iter_mut().filter(|p| p.segment == segment) {
            point.complete(observation_id);
            changed = true;
        }
        if changed {
            self.write(farm_id, &points)?;
        }
        Ok(points)
    }

    /// Attach an inspection suggestion to every point of the farm
    fn attach_inspection(
        &mut self,
        farm_id: u64,
        suggestion_id: u64,
        confidence_level: &str,
        target_entity: &str,
    ) -> Result<Vec<ObservationPoint>, StoreError> {
        let mut points = self.load(farm_id)?;
        if points.is_empty() {
            tracing::warn!(farm_id, "no observation points to attach inspection data to");
            return Ok(points);
        }

        for point in &mut points {
            point.attach_inspection(suggestion_id, confidence_level, target_entity);
        }
        self.write(farm_id, &points)?;
        Ok(points)
    }
}
