//! Application state for the web layer.

use std::sync::Arc;

use crate::trips::TripService;

/// Shared application state.
pub struct AppState<P> {
    /// Trip planning service
    pub trips: Arc<TripService<P>>,
}

impl<P> AppState<P> {
    pub fn new(trips: TripService<P>) -> Self {
        Self {
            trips: Arc::new(trips),
        }
    }
}

// A derived impl would require `P: Clone`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            trips: Arc::clone(&self.trips),
        }
    }
}
