//! In-process route provider (fallback when no API key is configured).
//!
//! Estimates road distance from great-circle distance and resolves place
//! names from a small gazetteer. Less accurate than the routing API but
//! always available, so it backs offline development and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use crate::domain::{Coordinates, NamedLocation, round_miles};

use super::error::RoutingError;
use super::provider::RouteProvider;

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Ratio of typical road distance to straight-line distance.
const DEFAULT_CIRCUITY: f64 = 1.2;

/// Route provider backed by fixed data.
#[derive(Debug)]
pub struct FixedRouteProvider {
    places: Vec<NamedLocation>,
    circuity: f64,
    fixed_miles: Option<Decimal>,
    failure: Option<u16>,
    distance_calls: AtomicUsize,
}

impl Default for FixedRouteProvider {
    fn default() -> Self {
        Self {
            places: Vec::new(),
            circuity: DEFAULT_CIRCUITY,
            fixed_miles: None,
            failure: None,
            distance_calls: AtomicUsize::new(0),
        }
    }
}

impl FixedRouteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that knows a handful of major US freight hubs.
    pub fn with_us_hubs() -> Self {
        let hubs = [
            ("Chicago, IL, USA", -87.6298, 41.8781),
            ("Denver, CO, USA", -104.9903, 39.7392),
            ("Dallas, TX, USA", -96.7970, 32.7767),
            ("Atlanta, GA, USA", -84.3880, 33.7490),
            ("Los Angeles, CA, USA", -118.2437, 34.0522),
            ("Kansas City, MO, USA", -94.5786, 39.0997),
            ("Memphis, TN, USA", -90.0490, 35.1495),
            ("Indianapolis, IN, USA", -86.1581, 39.7684),
            ("Salt Lake City, UT, USA", -111.8910, 40.7608),
            ("Phoenix, AZ, USA", -112.0740, 33.4484),
        ];
        hubs.into_iter()
            .fold(Self::default(), |provider, (name, lon, lat)| {
                match Coordinates::new(lon, lat) {
                    Ok(c) => provider.with_place(NamedLocation::new(name, c)),
                    Err(_) => provider,
                }
            })
    }

    /// Add a place to the gazetteer.
    pub fn with_place(mut self, place: NamedLocation) -> Self {
        self.places.push(place);
        self
    }

    /// Always report this distance, regardless of waypoints.
    pub fn with_fixed_miles(mut self, miles: Decimal) -> Self {
        self.fixed_miles = Some(miles);
        self
    }

    /// Set the road-to-straight-line distance ratio.
    pub fn with_circuity(mut self, circuity: f64) -> Self {
        self.circuity = circuity;
        self
    }

    /// Fail every distance request with the given API status.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    /// Number of distance requests served so far.
    pub fn distance_calls(&self) -> usize {
        self.distance_calls.load(Ordering::Relaxed)
    }

    fn matches<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a NamedLocation> {
        let needle = text.trim().to_lowercase();
        self.places
            .iter()
            .filter(move |p| !needle.is_empty() && p.name.to_lowercase().starts_with(&needle))
    }
}

impl RouteProvider for FixedRouteProvider {
    async fn driving_distance(&self, waypoints: &[Coordinates]) -> Result<Decimal, RoutingError> {
        self.distance_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(status) = self.failure {
            return Err(RoutingError::Api {
                status,
                message: "fixed provider failure".to_string(),
            });
        }
        if waypoints.len() < 2 {
            return Err(RoutingError::NoRoute);
        }
        if let Some(miles) = self.fixed_miles {
            return Ok(miles);
        }

        let straight: f64 = waypoints
            .windows(2)
            .map(|pair| haversine_miles(&pair[0], &pair[1]))
            .sum();
        let miles = Decimal::try_from(straight * self.circuity).unwrap_or(Decimal::ZERO);
        Ok(round_miles(miles))
    }

    async fn geocode(&self, text: &str) -> Result<Option<NamedLocation>, RoutingError> {
        Ok(self.matches(text).next().cloned())
    }

    async fn autocomplete(&self, text: &str) -> Result<Vec<NamedLocation>, RoutingError> {
        Ok(self.matches(text).cloned().collect())
    }
}

/// Great-circle distance between two points in miles.
fn haversine_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lng = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}
