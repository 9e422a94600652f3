//! Hours-of-Service trip segmentation engine.
//!
//! Simulates a single point-to-point trip under FMCSA property-carrying
//! rules: the 11-hour driving limit, the 14-hour on-duty window, the 10-hour
//! reset, the 30-minute break after 8 hours, plus fuel stops every 1000
//! miles. The output is an ordered list of segments, their partition into
//! calendar-day ELD logs, and a trip summary.
//!
//! The engine is a pure function of its inputs. It performs no I/O and
//! cannot fail; callers validate inputs through `TripInput::new`.
//!
//! The 70-hour/8-day cycle is not enforced. Cycle hours are carried
//! through to the summary as a projection only.

mod config;
mod daily_log;
mod engine;
mod state;


pub use config::{DayBoundary, HosConfig};
pub use daily_log::build_daily_logs;
pub use engine::{plan_trip, simulate};
pub use state::{Action, SimulationState};
