use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use workout_tracker_lib::Workout;

use crate::{collaborators::StateStorage, validator::ValidatedInput};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to deserialize persisted workouts: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Owning collection of workout records, insertion order preserved, plus the
/// persistence collaborator. No other component holds a mutable reference to
/// a record it did not get from here.
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    storage: Box<dyn StateStorage>,
}

impl WorkoutStore {
    pub fn new(storage: Box<dyn StateStorage>) -> Self {
        Self {
            workouts: Vec::new(),
            storage,
        }
    }

    /// Factory for workout records; the only way one is ever constructed.
    /// Input constraints were already established by the validator, so this
    /// always succeeds. Appends to the collection and returns the new record.
    pub fn create(&mut self, input: ValidatedInput, latitude: f64, longitude: f64) -> &Workout {
        let id = self.fresh_id();
        let created_at = Utc::now();
        let workout = match input {
            ValidatedInput::Running {
                distance_km,
                duration_min,
                cadence,
            } => Workout::running(id, latitude, longitude, distance_km, duration_min, cadence, created_at),
            ValidatedInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain,
            } => Workout::cycling(id, latitude, longitude, distance_km, duration_min, elevation_gain, created_at),
        };
        self.workouts.push(workout);
        self.workouts.last().unwrap()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub(crate) fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == id)
    }

    /// Read-only view, insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Whole-collection JSON snapshot. Derived metrics and click counters are
    /// part of the blob; nothing is recomputed on the way back in.
    pub fn serialize(&self) -> String {
        serde_json::to_string(&self.workouts).unwrap()
    }

    /// Snapshot the collection into the persistence collaborator.
    pub fn persist(&mut self) {
        let blob = self.serialize();
        self.storage.save(&blob);
    }

    /// Replace the collection with the persisted snapshot. An absent blob is
    /// "nothing to restore", not an error. A malformed blob leaves the
    /// collection empty and reports why.
    ///
    /// Restored records are plain data: derived metrics come back verbatim
    /// from the blob, they do not pass through the constructors again.
    pub fn restore(&mut self) -> Result<usize, StoreError> {
        let Some(blob) = self.storage.load() else {
            self.workouts.clear();
            return Ok(0);
        };
        match serde_json::from_str(&blob) {
            Ok(workouts) => {
                self.workouts = workouts;
                Ok(self.workouts.len())
            }
            Err(err) => {
                self.workouts.clear();
                Err(StoreError::Deserialization(err))
            }
        }
    }

    /// Clear the collection and erase the persisted state.
    pub fn reset(&mut self) {
        self.workouts.clear();
        self.storage.clear();
    }

    // Millisecond timestamp plus a random 16-bit suffix, hex. Collisions are
    // already practically impossible within a session; the loop makes the
    // per-store uniqueness invariant unconditional.
    fn fresh_id(&self) -> String {
        loop {
            let suffix: [u8; 2] = rand::random();
            let id = format!("{:x}{}", Utc::now().timestamp_millis(), hex::encode(suffix));
            if self.find_by_id(&id).is_none() {
                return id;
            }
            debug!("Workout id collision, regenerating");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, test_support::SharedStorage};

    fn running_input() -> ValidatedInput {
        ValidatedInput::Running {
            distance_km: 5.2,
            duration_min: 24.0,
            cadence: 170,
        }
    }

    fn cycling_input() -> ValidatedInput {
        ValidatedInput::Cycling {
            distance_km: 27.0,
            duration_min: 95.0,
            elevation_gain: 503.0,
        }
    }

    #[test]
    fn create_appends_in_order_with_unique_ids() {
        let mut store = WorkoutStore::new(Box::new(MemoryStorage::default()));
        let first = store.create(running_input(), 50.0, 20.0).id.clone();
        let second = store.create(cycling_input(), 51.0, 21.0).id.clone();

        assert_eq!(store.len(), 2);
        assert_ne!(first, second);
        assert_eq!(store.all()[0].id, first);
        assert_eq!(store.all()[1].id, second);
        assert!(store.all()[0].description.contains("Running on"));
    }

    #[test]
    fn find_by_id_returns_the_matching_record() {
        let mut store = WorkoutStore::new(Box::new(MemoryStorage::default()));
        let id = store.create(running_input(), 50.0, 20.0).id.clone();
        store.create(cycling_input(), 51.0, 21.0);

        assert_eq!(store.find_by_id(&id).map(|w| w.latitude), Some(50.0));
        assert!(store.find_by_id("nope").is_none());
    }

    #[test]
    fn persist_and_restore_round_trip_is_lossless() {
        let storage = SharedStorage::default();

        let mut store = WorkoutStore::new(Box::new(storage.clone()));
        store.create(running_input(), 50.0, 20.0);
        store.create(cycling_input(), 50.0, 20.0);
        let id = store.all()[0].id.clone();
        store.find_by_id_mut(&id).unwrap().register_click();
        store.persist();
        let originals = store.all().to_vec();

        // Simulated restart: a fresh store over the same storage.
        let mut restored = WorkoutStore::new(Box::new(storage));
        assert_eq!(restored.restore().unwrap(), 2);
        assert_eq!(restored.all(), originals.as_slice());
        assert_eq!(restored.all()[0].click_count, 1);
    }

    #[test]
    fn restore_with_nothing_persisted_yields_empty_store() {
        let mut store = WorkoutStore::new(Box::new(MemoryStorage::default()));
        assert_eq!(store.restore().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn restore_of_malformed_blob_reports_and_empties() {
        let storage = SharedStorage::default();
        storage.0.borrow_mut().replace("not json {".to_string());

        let mut store = WorkoutStore::new(Box::new(storage));
        store.create(running_input(), 50.0, 20.0);

        assert!(matches!(store.restore(), Err(StoreError::Deserialization(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn reset_empties_store_and_storage() {
        let storage = SharedStorage::default();
        let mut store = WorkoutStore::new(Box::new(storage.clone()));
        store.create(running_input(), 50.0, 20.0);
        store.persist();
        assert!(storage.load().is_some());

        store.reset();
        assert!(store.is_empty());
        assert!(storage.load().is_none());

        let mut after = WorkoutStore::new(Box::new(storage));
        assert_eq!(after.restore().unwrap(), 0);
    }
}
