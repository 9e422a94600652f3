//! Trip segment types.
//!
//! A trip is simulated as a contiguous sequence of segments, each a single
//! activity (driving, a rest, a stop) with a start and end time.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DutyStatus;

/// The activity performed during a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Driving,
    #[serde(rename = "rest_break")]
    RestBreak30,
    SleeperBerth,
    Fuel,
    Pickup,
    Dropoff,
}

impl SegmentKind {
    /// All kinds, in declaration order.
    pub const ALL: [SegmentKind; 6] = [
        SegmentKind::Driving,
        SegmentKind::RestBreak30,
        SegmentKind::SleeperBerth,
        SegmentKind::Fuel,
        SegmentKind::Pickup,
        SegmentKind::Dropoff,
    ];

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SegmentKind::Driving => "driving",
            SegmentKind::RestBreak30 => "rest_break",
            SegmentKind::SleeperBerth => "sleeper_berth",
            SegmentKind::Fuel => "fuel",
            SegmentKind::Pickup => "pickup",
            SegmentKind::Dropoff => "dropoff",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            SegmentKind::Driving => "Driving",
            SegmentKind::RestBreak30 => "30-min Rest Break",
            SegmentKind::SleeperBerth => "Sleeper Berth",
            SegmentKind::Fuel => "Fueling",
            SegmentKind::Pickup => "Pickup",
            SegmentKind::Dropoff => "Dropoff",
        }
    }

    /// The ELD duty status this activity is logged under.
    pub fn duty_status(&self) -> DutyStatus {
        match self {
            SegmentKind::Driving => DutyStatus::Driving,
            SegmentKind::SleeperBerth => DutyStatus::SleeperBerth,
            SegmentKind::RestBreak30 => DutyStatus::OffDuty,
            SegmentKind::Fuel | SegmentKind::Pickup | SegmentKind::Dropoff => {
                DutyStatus::OnDutyNotDriving
            }
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One activity in the simulated timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,

    /// 1-based position within the trip.
    pub sequence: u32,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Reported length in hours (2 decimal places).
    pub duration_hours: Decimal,

    /// Distance covered (1 decimal place). Zero unless driving.
    pub distance_miles: Decimal,

    pub location: String,
}

impl Segment {
    /// Wall-clock length of the segment.
    pub fn elapsed(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn is_driving(&self) -> bool {
        self.kind == SegmentKind::Driving
    }
}
