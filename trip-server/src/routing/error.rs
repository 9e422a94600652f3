//! Routing provider error types.

use crate::domain::InvalidCoordinates;

/// Errors from a distance or geocoding provider.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check OPENROUTE_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by routing API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The provider found no route between the waypoints
    #[error("no route found between waypoints")]
    NoRoute,

    /// The provider returned an unusable position
    #[error("provider returned {0}")]
    BadCoordinates(#[from] InvalidCoordinates),
}
