//! The routing provider abstraction.

use std::future::Future;

use rust_decimal::Decimal;

use crate::domain::{Coordinates, NamedLocation};

use super::client::OpenRouteClient;
use super::error::RoutingError;
use super::fixed::FixedRouteProvider;

/// Source of driving distances and place lookups.
///
/// This abstraction lets the trip service run against the live routing API,
/// a cache in front of it, or fixed data in tests.
pub trait RouteProvider: Send + Sync {
    /// Driving distance in miles along the given waypoints, in order.
    ///
    /// Implementations round to one decimal place.
    fn driving_distance(
        &self,
        waypoints: &[Coordinates],
    ) -> impl Future<Output = Result<Decimal, RoutingError>> + Send;

    /// Best single match for a free-text place name, if any.
    fn geocode(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Option<NamedLocation>, RoutingError>> + Send;

    /// Candidate places for a partially typed query.
    fn autocomplete(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<NamedLocation>, RoutingError>> + Send;
}

/// Either the live API client or the in-process fallback, chosen at startup.
#[derive(Debug)]
pub enum AnyRouteProvider {
    OpenRoute(OpenRouteClient),
    Fixed(FixedRouteProvider),
}

impl RouteProvider for AnyRouteProvider {
    async fn driving_distance(&self, waypoints: &[Coordinates]) -> Result<Decimal, RoutingError> {
        match self {
            Self::OpenRoute(client) => client.driving_distance(waypoints).await,
            Self::Fixed(fixed) => fixed.driving_distance(waypoints).await,
        }
    }

    async fn geocode(&self, text: &str) -> Result<Option<NamedLocation>, RoutingError> {
        match self {
            Self::OpenRoute(client) => client.geocode(text).await,
            Self::Fixed(fixed) => fixed.geocode(text).await,
        }
    }

    async fn autocomplete(&self, text: &str) -> Result<Vec<NamedLocation>, RoutingError> {
        match self {
            Self::OpenRoute(client) => client.autocomplete(text).await,
            Self::Fixed(fixed) => fixed.autocomplete(text).await,
        }
    }
}
