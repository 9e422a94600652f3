//! Domain types for the HOS trip planner.
//!
//! Validated inputs (coordinates, trip parameters) and the segments, daily
//! logs and summary produced by planning. Input types enforce their
//! invariants at construction time.

mod error;
mod hours;
mod location;
mod log;
mod segment;
mod trip;

pub use error::DomainError;
pub use hours::{duration_to_hours, hour_of_day, hours_to_duration, round_hours, round_miles};
pub use location::{Coordinates, InvalidCoordinates, NamedLocation};
pub use log::{DailyLogDay, DutyStatus, LogEntry};
pub use segment::{Segment, SegmentKind};
pub use trip::{MAX_CYCLE_HOURS, TripInput, TripPlan, TripSummary};
