//! Truck trip planning server.
//!
//! Plans a property-carrying driver's trip from their current location via
//! a pickup to a dropoff under the FMCSA hours-of-service rules, and
//! produces the duty segments and per-day ELD log sheets for it.

pub mod cache;
pub mod config;
pub mod domain;
pub mod hos;
pub mod routing;
pub mod store;
pub mod trips;
pub mod web;
