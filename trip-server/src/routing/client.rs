//! OpenRouteService HTTP client.
//!
//! Provides driving distances through the directions API and place lookups
//! through the Pelias-based geocoding API.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::{Coordinates, NamedLocation, round_miles};

use super::error::RoutingError;
use super::provider::RouteProvider;
use super::types::{DirectionsRequest, DirectionsResponse, FeatureCollection};

/// Default base URL for OpenRouteService.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing profile used for all distance requests.
const PROFILE: &str = "driving-car";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default number of autocomplete candidates.
const DEFAULT_AUTOCOMPLETE_SIZE: u8 = 6;

/// Default country restriction for geocoding.
const DEFAULT_COUNTRY: &str = "US";

const METERS_TO_MILES: Decimal = dec!(0.000621371);

/// Configuration for the OpenRouteService client.
#[derive(Debug, Clone)]
pub struct OpenRouteConfig {
    /// API key sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to the public service)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Number of autocomplete candidates to request
    pub autocomplete_size: u8,
    /// ISO country code that geocoding results are restricted to
    pub country: String,
}

impl OpenRouteConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            autocomplete_size: DEFAULT_AUTOCOMPLETE_SIZE,
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the number of autocomplete candidates.
    pub fn with_autocomplete_size(mut self, size: u8) -> Self {
        self.autocomplete_size = size;
        self
    }

    /// Restrict geocoding to another country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }
}

/// OpenRouteService API client.
#[derive(Debug, Clone)]
pub struct OpenRouteClient {
    http: reqwest::Client,
    base_url: String,
    autocomplete_size: u8,
    country: String,
    semaphore: Arc<Semaphore>,
}

impl OpenRouteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenRouteConfig) -> Result<Self, RoutingError> {
        let mut headers = HeaderMap::new();
        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| RoutingError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            autocomplete_size: config.autocomplete_size,
            country: config.country,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    async fn search(
        &self,
        endpoint: &str,
        text: &str,
        size: u8,
    ) -> Result<FeatureCollection, RoutingError> {
        let _permit = self.permit().await?;
        let url = format!("{}/geocode/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("text", text.to_string()),
                ("size", size.to_string()),
                ("boundary.country", self.country.clone()),
            ])
            .send()
            .await?;

        read_json(response).await
    }

    async fn permit(&self) -> Result<tokio::sync::SemaphorePermit<'_>, RoutingError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })
    }
}

impl RouteProvider for OpenRouteClient {
    async fn driving_distance(&self, waypoints: &[Coordinates]) -> Result<Decimal, RoutingError> {
        let _permit = self.permit().await?;
        let url = format!("{}/v2/directions/{}", self.base_url, PROFILE);
        let body = DirectionsRequest {
            coordinates: waypoints.iter().map(Coordinates::as_pair).collect(),
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let directions: DirectionsResponse = read_json(response).await?;

        let route = directions.routes.first().ok_or(RoutingError::NoRoute)?;
        let miles = meters_to_miles(route.summary.distance)?;
        debug!(waypoints = waypoints.len(), %miles, "fetched driving distance");
        Ok(miles)
    }

    async fn geocode(&self, text: &str) -> Result<Option<NamedLocation>, RoutingError> {
        let collection = self.search("search", text, 1).await?;
        collection
            .features
            .first()
            .map(|f| f.to_location(text))
            .transpose()
    }

    async fn autocomplete(&self, text: &str) -> Result<Vec<NamedLocation>, RoutingError> {
        let collection = self
            .search("autocomplete", text, self.autocomplete_size)
            .await?;

        // Skip malformed features rather than failing the whole lookup.
        let locations = collection
            .features
            .iter()
            .filter_map(|f| match f.to_location(text) {
                Ok(location) => Some(location),
                Err(e) => {
                    warn!(error = %e, "skipping autocomplete feature");
                    None
                }
            })
            .collect();
        Ok(locations)
    }
}

/// Map the response status to an error, or parse the body as JSON.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RoutingError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(RoutingError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RoutingError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RoutingError::Api {
            status: status.as_u16(),
            message: body.chars().take(500).collect(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| RoutingError::Json {
        message: e.to_string(),
    })
}

/// Convert a distance in metres to miles, rounded to one decimal place.
fn meters_to_miles(meters: f64) -> Result<Decimal, RoutingError> {
    let meters = Decimal::try_from(meters).map_err(|e| RoutingError::Json {
        message: format!("unusable route distance {meters}: {e}"),
    })?;
    Ok(round_miles(meters * METERS_TO_MILES))
}
