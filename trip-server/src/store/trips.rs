//! In-memory trip store.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::error::StoreError;
use super::record::{NewTrip, StoredTrip};
use super::snapshot::TripSnapshot;

#[derive(Debug, Default)]
struct Inner {
    trips: BTreeMap<u64, Arc<StoredTrip>>,
    next_id: u64,
}

/// Thread-safe store of planned trips.
///
/// Assigns sequential ids starting at 1. When backed by a snapshot file,
/// every insert rewrites the file so trips survive a restart.
#[derive(Debug, Clone, Default)]
pub struct TripStore {
    inner: Arc<RwLock<Inner>>,
    snapshot: Option<TripSnapshot>,
}

impl TripStore {
    /// Create an empty store that keeps trips in memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a store backed by a snapshot file, loading any trips in it.
    pub fn with_snapshot(snapshot: TripSnapshot) -> Result<Self, StoreError> {
        let loaded = snapshot.load()?;
        let next_id = loaded.iter().map(|t| t.id).max().unwrap_or(0);
        info!(
            path = %snapshot.path().display(),
            trips = loaded.len(),
            "loaded trip snapshot"
        );

        let trips = loaded.into_iter().map(|t| (t.id, Arc::new(t))).collect();
        Ok(Self {
            inner: Arc::new(RwLock::new(Inner { trips, next_id })),
            snapshot: Some(snapshot),
        })
    }

    /// Store a trip, assigning its id and creation time.
    ///
    /// A failed snapshot write is logged; the trip stays available in memory.
    pub async fn insert(&self, trip: NewTrip) -> Arc<StoredTrip> {
        let mut guard = self.inner.write().await;
        guard.next_id += 1;
        let id = guard.next_id;
        let stored = Arc::new(trip.into_stored(id, Utc::now()));
        guard.trips.insert(id, stored.clone());

        if let Some(snapshot) = &self.snapshot {
            let all: Vec<&StoredTrip> = guard.trips.values().map(Arc::as_ref).collect();
            if let Err(e) = snapshot.save(&all) {
                error!(error = %e, trip_id = id, "failed to write trip snapshot");
            }
        }

        stored
    }

    /// Look up a trip by id.
    pub async fn get(&self, id: u64) -> Option<Arc<StoredTrip>> {
        let guard = self.inner.read().await;
        guard.trips.get(&id).cloned()
    }

    /// All trips, newest first.
    pub async fn list(&self) -> Vec<Arc<StoredTrip>> {
        let guard = self.inner.read().await;
        guard.trips.values().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, NamedLocation, TripInput};
    use crate::hos::{HosConfig, plan_trip};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn place(name: &str) -> NamedLocation {
        NamedLocation::new(name, Coordinates::new(-87.63, 41.88).unwrap())
    }

    fn new_trip(miles: rust_decimal::Decimal) -> NewTrip {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let input = TripInput::new(start, miles, dec!(10), "Pickup", "Dropoff").unwrap();
        NewTrip {
            current_location: place("Current"),
            pickup_location: place("Pickup"),
            dropoff_location: place("Dropoff"),
            cycle_hours_used: dec!(10),
            plan: plan_trip(&input, &HosConfig::default()),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let store = TripStore::in_memory();
        assert!(store.list().await.is_empty());

        let first = store.insert(new_trip(dec!(100))).await;
        let second = store.insert(new_trip(dec!(200))).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn get_by_id() {
        let store = TripStore::in_memory();
        let stored = store.insert(new_trip(dec!(100))).await;

        let found = store.get(stored.id).await.unwrap();
        assert_eq!(found.plan.summary.total_distance_miles, dec!(100));
        assert!(store.get(99).await.is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = TripStore::in_memory();
        for miles in [dec!(100), dec!(200), dec!(300)] {
            store.insert(new_trip(miles)).await;
        }

        let ids: Vec<u64> = store.list().await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn snapshot_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("trips.json");

        let store = TripStore::with_snapshot(TripSnapshot::new(&path)).unwrap();
        let first = store.insert(new_trip(dec!(1200))).await;
        store.insert(new_trip(dec!(50))).await;
        assert!(path.exists());

        let reopened = TripStore::with_snapshot(TripSnapshot::new(&path)).unwrap();
        assert_eq!(reopened.list().await.len(), 2);
        assert_eq!(reopened.get(1).await.as_deref(), Some(first.as_ref()));

        // Ids continue after the highest loaded id.
        let third = reopened.insert(new_trip(dec!(10))).await;
        assert_eq!(third.id, 3);
    }

    #[test]
    fn missing_snapshot_is_empty() {
        let dir = tempdir().unwrap();
        let snapshot = TripSnapshot::new(dir.path().join("absent.json"));
        assert!(snapshot.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trips.json");
        std::fs::write(&path, "not json").unwrap();

        let result = TripStore::with_snapshot(TripSnapshot::new(&path));
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }
}
