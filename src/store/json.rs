use std::fs;
use std::path::{Path, PathBuf};

use super::{ObservationStore, StoreError};
use crate::observation::ObservationPoint;

/// One pretty-printed JSON file per farm inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;
        Ok(Self { dir })
    }

    pub fn farm_path(&self, farm_id: u64) -> PathBuf {
        self.dir.join(format!("farm-{}.json", farm_id))
    }
}

impl ObservationStore for JsonFileStore {
    fn load(&self, farm_id: u64) -> Result<Vec<ObservationPoint>, StoreError> {
        let path = self.farm_path(farm_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Writes to a sibling temp file, then renames over the target
    fn write(&mut self, farm_id: u64, points: &[ObservationPoint]) -> Result<(), StoreError> {
        let path = self.farm_path(farm_id);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(points).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&tmp, json).map_err(|source| io_error(&tmp, source))?;
        fs::rename(&tmp, &path).map_err(|source| io_error(&path, source))
    }

    fn clear(&mut self, farm_id: u64) -> Result<(), StoreError> {
        let path = self.farm_path(farm_id);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(io_error(&path, e)),
            _ => Ok(()),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use crate::observation::ObservationStatus;

    #[test]
    fn test_round_trip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("points")).unwrap();

        let mut point = ObservationPoint::new(5, GeoPoint::new(-27.5, 153.0), 1);
        point.observation_status = ObservationStatus::Completed;
        point.confidence_level = Some("95%".to_string());
        store.write(5, std::slice::from_ref(&point)).unwrap();

        let reopened = JsonFileStore::open(dir.path().join("points")).unwrap();
        assert_eq!(reopened.load(5).unwrap(), vec![point]);
        assert!(!store.farm_path(5).with_extension("json.tmp").exists());
    }

    #[test]
    fn test_attach_inspection_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let points = vec![
            ObservationPoint::new(4, GeoPoint::new(-27.5, 153.0), 1),
            ObservationPoint::new(4, GeoPoint::new(-27.4, 153.1), 2),
        ];
        store.write(4, &points).unwrap();

        let updated = store.attach_inspection(4, 17, "medium", "fall armyworm").unwrap();
        assert_eq!(updated.len(), 2);
        for point in &updated {
            assert_eq!(point.inspection_suggestion_id, Some(17));
            assert_eq!(point.confidence_level.as_deref(), Some("medium"));
            assert_eq!(point.target_entity.as_deref(), Some("fall armyworm"));
        }

        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load(4).unwrap(), updated);
    }

    #[test]
    fn test_mark_completed_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store
            .write(8, &[ObservationPoint::new(8, GeoPoint::new(-27.5, 153.0), 1)])
            .unwrap();

        store.mark_completed(8, 1, 40).unwrap();
        let reopened = JsonFileStore::open(dir.path()).unwrap();
        let stored = reopened.load(8).unwrap();
        assert_eq!(stored[0].observation_status, ObservationStatus::Completed);
        assert_eq!(stored[0].observation_id, Some(40));
    }

    #[test]
    fn test_missing_farm_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.load(42).unwrap().is_empty());
    }

    #[test]
    fn test_clear_missing_farm_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.clear(1).unwrap();
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(store.farm_path(3), "[{").unwrap();
        assert!(matches!(store.load(3), Err(StoreError::Json { .. })));
    }
}
