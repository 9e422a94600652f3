//! Web layer for the HOS trip planner.
//!
//! Provides the JSON API for planning and retrieving trips, plus HTML
//! pages rendering trips as ELD log sheets.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
