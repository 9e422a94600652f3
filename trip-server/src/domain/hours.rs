//! Decimal hour and mile arithmetic.
//!
//! Hours and miles are carried as `Decimal` so that a long simulated trip
//! does not accumulate floating-point drift. These helpers convert between
//! decimal hours and wall-clock durations and apply the rounding used in
//! trip output (2 places for hours, 1 place for miles).

use chrono::{DateTime, Duration, Timelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const MILLIS_PER_HOUR: Decimal = dec!(3600000);

/// Latest hour-of-day a timestamp can report.
const LAST_HOUR_OF_DAY: Decimal = dec!(23.99);

/// Round an hour value to 2 decimal places (half away from zero).
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a mile value to 1 decimal place (half away from zero).
pub fn round_miles(miles: Decimal) -> Decimal {
    miles.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert decimal hours to a wall-clock duration with millisecond precision.
///
/// Any positive number of hours yields at least one millisecond, so a
/// segment with positive length never collapses to an empty interval.
///
/// # Examples
///
/// ```
/// use trip_server::domain::hours_to_duration;
/// use chrono::Duration;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(hours_to_duration(dec!(1.5)), Duration::minutes(90));
/// assert_eq!(hours_to_duration(dec!(0)), Duration::zero());
/// ```
pub fn hours_to_duration(hours: Decimal) -> Duration {
    if hours <= Decimal::ZERO {
        return Duration::zero();
    }
    let millis = (hours * MILLIS_PER_HOUR)
        .round()
        .to_i64()
        .unwrap_or(i64::MAX)
        .max(1);
    Duration::milliseconds(millis)
}

/// Convert a wall-clock duration to decimal hours (unrounded).
pub fn duration_to_hours(duration: Duration) -> Decimal {
    Decimal::from(duration.num_milliseconds()) / MILLIS_PER_HOUR
}

/// Fractional hour-of-day of a timestamp, rounded to 2 decimal places.
///
/// The result is always below 24: the last seconds of a day read as 23.99
/// rather than rounding up to the next day's midnight.
///
/// # Examples
///
/// ```
/// use trip_server::domain::hour_of_day;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal_macros::dec;
///
/// let t = Utc.with_ymd_and_hms(2024, 3, 15, 14, 45, 0).unwrap();
/// assert_eq!(hour_of_day(t), dec!(14.75));
/// ```
pub fn hour_of_day(time: DateTime<Utc>) -> Decimal {
    let hour = Decimal::from(time.hour());
    let minute = Decimal::from(time.minute()) / dec!(60);
    let second = Decimal::from(time.second()) / dec!(3600);
    round_hours(hour + minute + second).min(LAST_HOUR_OF_DAY)
}
