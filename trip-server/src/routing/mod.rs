//! Driving distance and geocoding providers.
//!
//! `OpenRouteClient` talks to the OpenRouteService API. `FixedRouteProvider`
//! answers from in-process data when no API key is available.

mod client;
mod error;
mod fixed;
mod provider;
mod types;

pub use client::{OpenRouteClient, OpenRouteConfig};
pub use error::RoutingError;
pub use fixed::FixedRouteProvider;
pub use provider::{AnyRouteProvider, RouteProvider};
pub use types::{DirectionsResponse, FeatureCollection};
