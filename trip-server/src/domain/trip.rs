//! Trip input and planned-trip output types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{DailyLogDay, DomainError, Segment};

/// Upper bound of the rolling 8-day on-duty cycle.
pub const MAX_CYCLE_HOURS: Decimal = dec!(70);

/// Everything the HOS engine needs to plan one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripInput {
    start_time: DateTime<Utc>,
    total_miles: Decimal,
    cycle_hours_used: Decimal,
    pickup_label: String,
    dropoff_label: String,
}

impl TripInput {
    /// Create a validated trip input.
    ///
    /// Rejects non-positive distances, cycle hours outside `0..=70` and
    /// empty labels.
    pub fn new(
        start_time: DateTime<Utc>,
        total_miles: Decimal,
        cycle_hours_used: Decimal,
        pickup_label: impl Into<String>,
        dropoff_label: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if total_miles <= Decimal::ZERO {
            return Err(DomainError::NonPositiveDistance(total_miles));
        }
        if cycle_hours_used < Decimal::ZERO || cycle_hours_used > MAX_CYCLE_HOURS {
            return Err(DomainError::CycleHoursOutOfRange {
                value: cycle_hours_used,
                max: MAX_CYCLE_HOURS,
            });
        }
        let pickup_label = pickup_label.into();
        if pickup_label.trim().is_empty() {
            return Err(DomainError::EmptyField("pickup location"));
        }
        let dropoff_label = dropoff_label.into();
        if dropoff_label.trim().is_empty() {
            return Err(DomainError::EmptyField("dropoff location"));
        }

        Ok(Self {
            start_time,
            total_miles,
            cycle_hours_used,
            pickup_label,
            dropoff_label,
        })
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn total_miles(&self) -> Decimal {
        self.total_miles
    }

    pub fn cycle_hours_used(&self) -> Decimal {
        self.cycle_hours_used
    }

    pub fn pickup_label(&self) -> &str {
        &self.pickup_label
    }

    pub fn dropoff_label(&self) -> &str {
        &self.dropoff_label
    }
}

/// Totals derived from a planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    /// The planned distance given as input.
    pub total_distance_miles: Decimal,

    /// Sum of driving segment durations.
    pub total_driving_hours: Decimal,

    pub fuel_stops: usize,

    /// Number of 10-hour sleeper-berth resets.
    pub required_rest_stops: usize,

    /// Number of 30-minute breaks.
    pub rest_breaks: usize,

    /// Sum of all segment durations.
    pub total_trip_hours: Decimal,

    pub estimated_arrival: DateTime<Utc>,

    /// Cycle hours already used plus the on-duty hours of this trip.
    /// Reported only; planning does not consult it.
    pub projected_cycle_hours: Decimal,
}

impl TripSummary {
    /// Whether the trip would push the driver past the 70-hour cycle.
    pub fn exceeds_cycle_limit(&self) -> bool {
        self.projected_cycle_hours > MAX_CYCLE_HOURS
    }
}

/// Output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub segments: Vec<Segment>,
    pub daily_logs: Vec<DailyLogDay>,
    pub summary: TripSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn valid_input() {
        let input = TripInput::new(t0(), dec!(300), dec!(12.5), "Chicago", "Denver").unwrap();
        assert_eq!(input.total_miles(), dec!(300));
        assert_eq!(input.cycle_hours_used(), dec!(12.5));
        assert_eq!(input.pickup_label(), "Chicago");
        assert_eq!(input.dropoff_label(), "Denver");
        assert_eq!(input.start_time(), t0());
    }

    #[test]
    fn rejects_non_positive_distance() {
        assert_eq!(
            TripInput::new(t0(), dec!(0), dec!(0), "A", "B"),
            Err(DomainError::NonPositiveDistance(dec!(0)))
        );
        assert!(TripInput::new(t0(), dec!(-5), dec!(0), "A", "B").is_err());
    }

    #[test]
    fn rejects_cycle_hours_out_of_range() {
        assert!(TripInput::new(t0(), dec!(10), dec!(70), "A", "B").is_ok());
        assert!(TripInput::new(t0(), dec!(10), dec!(70.01), "A", "B").is_err());
        assert!(TripInput::new(t0(), dec!(10), dec!(-1), "A", "B").is_err());
    }

    #[test]
    fn rejects_blank_labels() {
        assert_eq!(
            TripInput::new(t0(), dec!(10), dec!(0), "  ", "B"),
            Err(DomainError::EmptyField("pickup location"))
        );
        assert_eq!(
            TripInput::new(t0(), dec!(10), dec!(0), "A", ""),
            Err(DomainError::EmptyField("dropoff location"))
        );
    }
}
