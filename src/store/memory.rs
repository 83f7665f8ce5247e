use std::collections::HashMap;

use super::{ObservationStore, StoreError};
use crate::observation::ObservationPoint;

/// Process-local store, mainly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    farms: HashMap<u64, Vec<ObservationPoint>>,
}

impl ObservationStore for MemoryStore {
    fn load(&self, farm_id: u64) -> Result<Vec<ObservationPoint>, StoreError> {
        Ok(self.farms.get(&farm_id).cloned().unwrap_or_default())
    }

    fn write(&mut self, farm_id: u64, points: &[ObservationPoint]) -> Result<(), StoreError> {
        self.farms.insert(farm_id, points.to_vec());
        Ok(())
    }

    fn clear(&mut self, farm_id: u64) -> Result<(), StoreError> {
        self.farms.remove(&farm_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    #[test]
    fn test_save_skips_farm_with_points() {
        let mut store = MemoryStore::default();
        let first = vec![ObservationPoint::new(1, GeoPoint::new(0.0, 0.0), 1)];
        let second = vec![ObservationPoint::new(1, GeoPoint::new(5.0, 5.0), 1)];

        assert_eq!(store.save(1, &first).unwrap(), first);
        assert_eq!(store.save(1, &second).unwrap(), first);
    }

    #[test]
    fn test_mark_completed_updates_one_segment() {
        let mut store = MemoryStore::default();
        let points: Vec<ObservationPoint> = (1..=3)
            .map(|segment| ObservationPoint::new(6, GeoPoint::new(0.0, segment as f64), segment))
            .collect();
        store.write(6, &points).unwrap();

        let updated = store.mark_completed(6, 2, 501).unwrap();
        let completed: Vec<usize> = updated
            .iter()
            .filter(|p| p.is_completed())
            .map(|p| p.segment)
            .collect();
        assert_eq!(completed, vec![2]);
        assert_eq!(updated[1].observation_id, Some(501));
        assert_eq!(store.load(6).unwrap(), updated);
    }

    #[test]
    fn test_updates_on_empty_farm_return_nothing() {
        let mut store = MemoryStore::default();
        assert!(store.mark_completed(9, 1, 1).unwrap().is_empty());
        assert!(store.attach_inspection(9, 3, "high", "aphids").unwrap().is_empty());
        assert!(store.load(9).unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::default();
        store
            .write(2, &[ObservationPoint::new(2, GeoPoint::new(0.0, 0.0), 1)])
            .unwrap();
        store.clear(2).unwrap();
        assert!(store.load(2).unwrap().is_empty());
    }
}
