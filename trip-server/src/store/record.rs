//! The persisted form of a planned trip.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{NamedLocation, TripPlan};

/// A planned trip as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTrip {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub current_location: NamedLocation,
    pub pickup_location: NamedLocation,
    pub dropoff_location: NamedLocation,
    pub cycle_hours_used: Decimal,
    pub plan: TripPlan,
}

/// A trip ready to be stored; the store assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub current_location: NamedLocation,
    pub pickup_location: NamedLocation,
    pub dropoff_location: NamedLocation,
    pub cycle_hours_used: Decimal,
    pub plan: TripPlan,
}

impl NewTrip {
    pub(super) fn into_stored(self, id: u64, created_at: DateTime<Utc>) -> StoredTrip {
        StoredTrip {
            id,
            created_at,
            current_location: self.current_location,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            cycle_hours_used: self.cycle_hours_used,
            plan: self.plan,
        }
    }
}
