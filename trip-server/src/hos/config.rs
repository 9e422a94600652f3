//! Regulatory and planning parameters for the HOS engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// How segments that cross midnight are attributed to daily logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// Split the segment at midnight; each calendar day gets the part that
    /// falls on it. The part before midnight ends at hour 24.0.
    #[default]
    SplitAtMidnight,

    /// Attribute the whole segment to the date it starts on. The entry's
    /// end hour is the raw end hour-of-day and may be below its start hour.
    StartDate,
}

/// Configuration parameters for trip simulation.
#[derive(Debug, Clone)]
pub struct HosConfig {
    /// Maximum driving hours per duty window.
    pub max_daily_driving_hours: Decimal,

    /// Maximum length of the on-duty window.
    pub max_daily_on_duty_hours: Decimal,

    /// Off-duty time that resets the daily window.
    pub required_off_duty_hours: Decimal,

    /// Driving + on-duty time after which a break is due.
    pub break_after_hours: Decimal,

    /// Length of the mandatory break.
    pub rest_break_hours: Decimal,

    /// Assumed constant cruising speed (mph).
    pub avg_speed_mph: Decimal,

    /// Distance between fuel stops (miles).
    pub fuel_range_miles: Decimal,

    pub fuel_stop_hours: Decimal,

    /// Time spent loading at pickup and unloading at dropoff.
    pub pickup_dropoff_hours: Decimal,

    /// Longest single driving segment before limits are re-checked.
    pub max_driving_chunk_hours: Decimal,

    pub day_boundary: DayBoundary,
}

impl HosConfig {
    /// Use a different day boundary policy.
    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }
}

impl Default for HosConfig {
    fn default() -> Self {
        Self {
            max_daily_driving_hours: dec!(11.0),
            max_daily_on_duty_hours: dec!(14.0),
            required_off_duty_hours: dec!(10.0),
            break_after_hours: dec!(8.0),
            rest_break_hours: dec!(0.5),
            avg_speed_mph: dec!(55.0),
            fuel_range_miles: dec!(1000.0),
            fuel_stop_hours: dec!(0.5),
            pickup_dropoff_hours: dec!(1.0),
            max_driving_chunk_hours: dec!(4.0),
            day_boundary: DayBoundary::SplitAtMidnight,
        }
    }
}
