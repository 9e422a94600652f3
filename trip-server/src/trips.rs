//! Trip planning service.
//!
//! Resolves the three trip locations, asks the routing provider for the
//! driving distance, runs the HOS engine and stores the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{Coordinates, DomainError, MAX_CYCLE_HOURS, NamedLocation, TripInput};
use crate::hos::{HosConfig, plan_trip};
use crate::routing::{RouteProvider, RoutingError};
use crate::store::{NewTrip, StoredTrip, TripStore};

/// Errors from planning or looking up trips.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// Request failed domain validation
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// A location's coordinates were unusable
    #[error("{field}: {reason}")]
    InvalidLocation { field: &'static str, reason: String },

    /// Geocoding found no match for a location name
    #[error("{field}: no match found for '{name}'")]
    UnknownPlace { field: &'static str, name: String },

    /// The routing provider failed
    #[error("routing failed: {0}")]
    Routing(#[from] RoutingError),

    /// The provider returned a distance the engine cannot plan
    #[error("invalid route distance calculated ({0} miles)")]
    InvalidDistance(Decimal),

    /// No trip with this id
    #[error("trip {0} not found")]
    NotFound(u64),
}

/// A location as supplied by a client: a name, and coordinates if known.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRequest {
    pub name: String,
    /// `[longitude, latitude]`; geocoded from `name` when absent.
    pub coords: Option<Vec<f64>>,
}

impl PlaceRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coords: None,
        }
    }

    pub fn at(name: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            name: name.into(),
            coords: Some(vec![longitude, latitude]),
        }
    }
}

/// A request to plan a new trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub current_location: PlaceRequest,
    pub pickup_location: PlaceRequest,
    pub dropoff_location: PlaceRequest,
    pub cycle_hours_used: Decimal,
    /// Defaults to the time the request is handled.
    pub start_time: Option<DateTime<Utc>>,
}

/// Plans, stores and retrieves trips.
pub struct TripService<P> {
    provider: Arc<P>,
    store: TripStore,
    config: HosConfig,
}

impl<P: RouteProvider> TripService<P> {
    pub fn new(provider: Arc<P>, store: TripStore, config: HosConfig) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    /// Plan a trip and store it.
    pub async fn create(&self, request: TripRequest) -> Result<Arc<StoredTrip>, TripError> {
        validate_cycle_hours(request.cycle_hours_used)?;

        let (current, pickup, dropoff) = futures::try_join!(
            self.resolve("current location", &request.current_location),
            self.resolve("pickup location", &request.pickup_location),
            self.resolve("dropoff location", &request.dropoff_location),
        )?;

        let waypoints = [current.coordinates, pickup.coordinates, dropoff.coordinates];
        let miles = self.provider.driving_distance(&waypoints).await?;
        if miles <= Decimal::ZERO {
            return Err(TripError::InvalidDistance(miles));
        }

        let start_time = request.start_time.unwrap_or_else(Utc::now);
        let input = TripInput::new(
            start_time,
            miles,
            request.cycle_hours_used,
            pickup.name.as_str(),
            dropoff.name.as_str(),
        )?;
        let plan = plan_trip(&input, &self.config);

        if plan.summary.exceeds_cycle_limit() {
            warn!(
                projected = %plan.summary.projected_cycle_hours,
                limit = %MAX_CYCLE_HOURS,
                "trip exceeds the 70-hour cycle"
            );
        }

        let stored = self
            .store
            .insert(NewTrip {
                current_location: current,
                pickup_location: pickup,
                dropoff_location: dropoff,
                cycle_hours_used: request.cycle_hours_used,
                plan,
            })
            .await;

        info!(
            trip_id = stored.id,
            %miles,
            segments = stored.plan.segments.len(),
            days = stored.plan.daily_logs.len(),
            "created trip"
        );
        Ok(stored)
    }

    /// Look up a stored trip.
    pub async fn get(&self, id: u64) -> Result<Arc<StoredTrip>, TripError> {
        self.store.get(id).await.ok_or(TripError::NotFound(id))
    }

    /// All stored trips, newest first.
    pub async fn list(&self) -> Vec<Arc<StoredTrip>> {
        self.store.list().await
    }

    /// Place suggestions for a partially typed query.
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<NamedLocation>, TripError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::EmptyField("query").into());
        }
        Ok(self.provider.autocomplete(query).await?)
    }

    /// Turn a client-supplied place into a located place.
    async fn resolve(
        &self,
        field: &'static str,
        place: &PlaceRequest,
    ) -> Result<NamedLocation, TripError> {
        let name = place.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyField(field).into());
        }

        match &place.coords {
            Some(values) => {
                let coordinates =
                    Coordinates::from_slice(values).map_err(|e| TripError::InvalidLocation {
                        field,
                        reason: e.to_string(),
                    })?;
                Ok(NamedLocation::new(name, coordinates))
            }
            None => {
                let found = self.provider.geocode(name).await?;
                let found = found.ok_or_else(|| TripError::UnknownPlace {
                    field,
                    name: name.to_string(),
                })?;
                // Keep the name the user typed; only the position is looked up.
                Ok(NamedLocation::new(name, found.coordinates))
            }
        }
    }
}

fn validate_cycle_hours(hours: Decimal) -> Result<(), DomainError> {
    if hours < Decimal::ZERO || hours > MAX_CYCLE_HOURS {
        return Err(DomainError::CycleHoursOutOfRange {
            value: hours,
            max: MAX_CYCLE_HOURS,
        });
    }
    Ok(())
}
