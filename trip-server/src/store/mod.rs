//! Persistence for planned trips.

mod error;
mod record;
mod snapshot;
mod trips;

pub use error::StoreError;
pub use record::{NewTrip, StoredTrip};
pub use snapshot::TripSnapshot;
pub use trips::TripStore;
