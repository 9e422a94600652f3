//! Simulation state and single-step transitions.
//!
//! The engine threads an immutable `SimulationState` through the trip. Each
//! step picks the next `Action` from the current counters and produces the
//! emitted segment together with a fresh state; nothing is mutated in place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Segment, SegmentKind, hours_to_duration, round_hours, round_miles};

use super::config::HosConfig;

pub(crate) const ON_ROUTE: &str = "On Route";
pub(crate) const FUEL_STATION: &str = "Fuel Station";
pub(crate) const REST_STOP: &str = "Rest Stop";
pub(crate) const REST_AREA: &str = "Rest Area";

/// What the driver does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop for fuel.
    Fuel,
    /// Take the 30-minute break.
    RestBreak,
    /// Take the 10-hour sleeper-berth reset.
    Reset,
    /// Drive for `hours`, covering `miles`.
    Drive { hours: Decimal, miles: Decimal },
}

/// Counters carried between simulation steps.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Simulated wall-clock time.
    pub clock: DateTime<Utc>,

    /// Sequence number the next segment will get.
    pub next_sequence: u32,

    /// Driving hours in the current duty window.
    pub daily_driving_hours: Decimal,

    /// On-duty hours in the current duty window.
    pub daily_on_duty_hours: Decimal,

    /// Driving + on-duty hours since the last break or reset.
    pub hours_since_break: Decimal,

    /// Miles driven since the last fuel stop.
    pub miles_since_fuel: Decimal,

    /// Miles still to drive.
    pub miles_remaining: Decimal,
}

impl SimulationState {
    /// Initial state at trip start, before anything has been emitted.
    pub fn new(start: DateTime<Utc>, total_miles: Decimal) -> Self {
        Self {
            clock: start,
            next_sequence: 1,
            daily_driving_hours: Decimal::ZERO,
            daily_on_duty_hours: Decimal::ZERO,
            hours_since_break: Decimal::ZERO,
            miles_since_fuel: Decimal::ZERO,
            miles_remaining: total_miles,
        }
    }

    /// Whether all planned miles have been driven.
    pub fn is_complete(&self) -> bool {
        self.miles_remaining <= Decimal::ZERO
    }

    /// Choose the next action.
    ///
    /// Checks run in a fixed priority order: fuel, break, daily limits,
    /// then driving. The first that applies wins.
    pub fn next_action(&self, config: &HosConfig) -> Action {
        if self.miles_since_fuel >= config.fuel_range_miles {
            return Action::Fuel;
        }

        if self.hours_since_break >= config.break_after_hours {
            return Action::RestBreak;
        }

        let driving_left = config.max_daily_driving_hours - self.daily_driving_hours;
        let on_duty_left = config.max_daily_on_duty_hours - self.daily_on_duty_hours;
        if driving_left <= Decimal::ZERO || on_duty_left <= Decimal::ZERO {
            return Action::Reset;
        }

        let limit = driving_left
            .min(on_duty_left)
            .min(config.max_driving_chunk_hours);
        let hours_needed = self.miles_remaining / config.avg_speed_mph;

        // Finishing the trip consumes exactly what is left, so no sliver of
        // distance survives rounding.
        if hours_needed <= limit {
            Action::Drive {
                hours: hours_needed,
                miles: self.miles_remaining,
            }
        } else {
            Action::Drive {
                hours: limit,
                miles: limit * config.avg_speed_mph,
            }
        }
    }

    /// Apply an action, returning the emitted segment and the next state.
    pub fn apply(&self, action: Action, config: &HosConfig) -> (Segment, SimulationState) {
        match action {
            Action::Fuel => {
                let hours = config.fuel_stop_hours;
                let (segment, advanced) = self.emit(SegmentKind::Fuel, hours, hours, FUEL_STATION);
                let next = SimulationState {
                    daily_on_duty_hours: self.daily_on_duty_hours + hours,
                    hours_since_break: self.hours_since_break + hours,
                    miles_since_fuel: Decimal::ZERO,
                    ..advanced
                };
                (segment, next)
            }
            Action::RestBreak => {
                let hours = config.rest_break_hours;
                let (segment, advanced) =
                    self.emit(SegmentKind::RestBreak30, hours, hours, REST_STOP);
                let next = SimulationState {
                    hours_since_break: Decimal::ZERO,
                    ..advanced
                };
                (segment, next)
            }
            Action::Reset => {
                let hours = config.required_off_duty_hours;
                let (segment, advanced) =
                    self.emit(SegmentKind::SleeperBerth, hours, hours, REST_AREA);
                let next = SimulationState {
                    daily_driving_hours: Decimal::ZERO,
                    daily_on_duty_hours: Decimal::ZERO,
                    hours_since_break: Decimal::ZERO,
                    ..advanced
                };
                (segment, next)
            }
            Action::Drive { hours, miles } => {
                let (mut segment, advanced) =
                    self.emit(SegmentKind::Driving, hours, round_hours(hours), ON_ROUTE);
                segment.distance_miles = round_miles(miles);
                let next = SimulationState {
                    daily_driving_hours: self.daily_driving_hours + hours,
                    daily_on_duty_hours: self.daily_on_duty_hours + hours,
                    hours_since_break: self.hours_since_break + hours,
                    miles_since_fuel: self.miles_since_fuel + segment.distance_miles,
                    miles_remaining: (self.miles_remaining - miles).max(Decimal::ZERO),
                    ..advanced
                };
                (segment, next)
            }
        }
    }

    /// Emit a fixed-length on-duty stop (pickup or dropoff).
    pub fn on_duty_stop(
        &self,
        kind: SegmentKind,
        hours: Decimal,
        location: &str,
    ) -> (Segment, SimulationState) {
        let (segment, advanced) = self.emit(kind, hours, hours, location);
        let next = SimulationState {
            daily_on_duty_hours: self.daily_on_duty_hours + hours,
            ..advanced
        };
        (segment, next)
    }

    /// Build a segment starting at the current clock and advance the clock
    /// and sequence past it. Counters are left for the caller to update.
    fn emit(
        &self,
        kind: SegmentKind,
        hours: Decimal,
        reported_hours: Decimal,
        location: &str,
    ) -> (Segment, SimulationState) {
        let end_time = self.clock + hours_to_duration(hours);
        let segment = Segment {
            kind,
            sequence: self.next_sequence,
            start_time: self.clock,
            end_time,
            duration_hours: reported_hours,
            distance_miles: Decimal::ZERO,
            location: location.to_string(),
        };
        let advanced = SimulationState {
            clock: end_time,
            next_sequence: self.next_sequence + 1,
            ..self.clone()
        };
        (segment, advanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()
    }

    fn state(miles: Decimal) -> SimulationState {
        SimulationState::new(t0(), miles)
    }

    #[test]
    fn fuel_has_priority_over_everything() {
        let s = SimulationState {
            miles_since_fuel: dec!(1000),
            hours_since_break: dec!(9),
            daily_driving_hours: dec!(11),
            ..state(dec!(500))
        };
        assert_eq!(s.next_action(&HosConfig::default()), Action::Fuel);
    }

    #[test]
    fn break_before_daily_reset() {
        let s = SimulationState {
            miles_since_fuel: dec!(999.9),
            hours_since_break: dec!(8),
            daily_driving_hours: dec!(11),
            ..state(dec!(500))
        };
        assert_eq!(s.next_action(&HosConfig::default()), Action::RestBreak);
    }

    #[test]
    fn reset_when_driving_exhausted() {
        let s = SimulationState {
            daily_driving_hours: dec!(11),
            daily_on_duty_hours: dec!(12),
            ..state(dec!(500))
        };
        assert_eq!(s.next_action(&HosConfig::default()), Action::Reset);
    }

    #[test]
    fn reset_when_on_duty_window_exhausted() {
        let s = SimulationState {
            daily_driving_hours: dec!(6),
            daily_on_duty_hours: dec!(14),
            ..state(dec!(500))
        };
        assert_eq!(s.next_action(&HosConfig::default()), Action::Reset);
    }

    #[test]
    fn drive_is_capped_at_chunk_size() {
        let s = state(dec!(500));
        assert_eq!(
            s.next_action(&HosConfig::default()),
            Action::Drive {
                hours: dec!(4),
                miles: dec!(220)
            }
        );
    }

    #[test]
    fn drive_is_capped_by_remaining_daily_driving() {
        let s = SimulationState {
            daily_driving_hours: dec!(9.5),
            daily_on_duty_hours: dec!(10.5),
            ..state(dec!(500))
        };
        assert_eq!(
            s.next_action(&HosConfig::default()),
            Action::Drive {
                hours: dec!(1.5),
                miles: dec!(82.5)
            }
        );
    }

    #[test]
    fn drive_is_capped_by_remaining_on_duty() {
        let s = SimulationState {
            daily_driving_hours: dec!(5),
            daily_on_duty_hours: dec!(13.25),
            ..state(dec!(500))
        };
        assert_eq!(
            s.next_action(&HosConfig::default()),
            Action::Drive {
                hours: dec!(0.75),
                miles: dec!(41.25)
            }
        );
    }

    #[test]
    fn final_drive_consumes_exact_remaining_miles() {
        let s = state(dec!(80));
        let Action::Drive { hours, miles } = s.next_action(&HosConfig::default()) else {
            panic!("expected drive");
        };
        assert_eq!(miles, dec!(80));
        assert_eq!(round_hours(hours), dec!(1.45));

        let (segment, next) = s.apply(Action::Drive { hours, miles }, &HosConfig::default());
        assert!(next.is_complete());
        assert_eq!(next.miles_remaining, Decimal::ZERO);
        assert_eq!(segment.distance_miles, dec!(80.0));
        assert_eq!(segment.duration_hours, dec!(1.45));
    }

    #[test]
    fn apply_drive_updates_counters() {
        let config = HosConfig::default();
        let s = SimulationState {
            daily_on_duty_hours: dec!(1),
            ..state(dec!(500))
        };
        let action = s.next_action(&config);
        let (segment, next) = s.apply(action, &config);

        assert_eq!(segment.kind, SegmentKind::Driving);
        assert_eq!(segment.sequence, 1);
        assert_eq!(segment.location, ON_ROUTE);
        assert_eq!(segment.end_time - segment.start_time, Duration::hours(4));
        assert_eq!(next.clock, t0() + Duration::hours(4));
        assert_eq!(next.next_sequence, 2);
        assert_eq!(next.daily_driving_hours, dec!(4));
        assert_eq!(next.daily_on_duty_hours, dec!(5));
        assert_eq!(next.hours_since_break, dec!(4));
        assert_eq!(next.miles_since_fuel, dec!(220.0));
        assert_eq!(next.miles_remaining, dec!(280));

        // The receiver is untouched.
        assert_eq!(s.clock, t0());
        assert_eq!(s.miles_remaining, dec!(500));
    }

    #[test]
    fn apply_fuel_counts_as_on_duty() {
        let config = HosConfig::default();
        let s = SimulationState {
            miles_since_fuel: dec!(1100),
            daily_driving_hours: dec!(5),
            daily_on_duty_hours: dec!(6),
            hours_since_break: dec!(3),
            ..state(dec!(500))
        };
        let (segment, next) = s.apply(Action::Fuel, &config);

        assert_eq!(segment.kind, SegmentKind::Fuel);
        assert_eq!(segment.location, FUEL_STATION);
        assert_eq!(segment.duration_hours, dec!(0.5));
        assert_eq!(next.miles_since_fuel, Decimal::ZERO);
        assert_eq!(next.daily_driving_hours, dec!(5));
        assert_eq!(next.daily_on_duty_hours, dec!(6.5));
        assert_eq!(next.hours_since_break, dec!(3.5));
    }

    #[test]
    fn apply_break_only_resets_break_counter() {
        let config = HosConfig::default();
        let s = SimulationState {
            daily_driving_hours: dec!(8),
            daily_on_duty_hours: dec!(9),
            hours_since_break: dec!(9),
            ..state(dec!(500))
        };
        let (segment, next) = s.apply(Action::RestBreak, &config);

        assert_eq!(segment.kind, SegmentKind::RestBreak30);
        assert_eq!(segment.location, REST_STOP);
        assert_eq!(next.hours_since_break, Decimal::ZERO);
        assert_eq!(next.daily_driving_hours, dec!(8));
        assert_eq!(next.daily_on_duty_hours, dec!(9));
        assert_eq!(next.clock, t0() + Duration::minutes(30));
    }

    #[test]
    fn apply_reset_clears_duty_window() {
        let config = HosConfig::default();
        let s = SimulationState {
            daily_driving_hours: dec!(11),
            daily_on_duty_hours: dec!(13),
            hours_since_break: dec!(3),
            miles_since_fuel: dec!(600),
            ..state(dec!(500))
        };
        let (segment, next) = s.apply(Action::Reset, &config);

        assert_eq!(segment.kind, SegmentKind::SleeperBerth);
        assert_eq!(segment.location, REST_AREA);
        assert_eq!(segment.duration_hours, dec!(10));
        assert_eq!(next.daily_driving_hours, Decimal::ZERO);
        assert_eq!(next.daily_on_duty_hours, Decimal::ZERO);
        assert_eq!(next.hours_since_break, Decimal::ZERO);
        assert_eq!(next.miles_since_fuel, dec!(600));
        assert_eq!(next.clock, t0() + Duration::hours(10));
    }

    #[test]
    fn on_duty_stop_uses_given_label() {
        let (segment, next) =
            state(dec!(10)).on_duty_stop(SegmentKind::Pickup, dec!(1), "Chicago, IL");

        assert_eq!(segment.kind, SegmentKind::Pickup);
        assert_eq!(segment.location, "Chicago, IL");
        assert_eq!(segment.distance_miles, Decimal::ZERO);
        assert_eq!(next.daily_on_duty_hours, dec!(1));
        assert_eq!(next.hours_since_break, Decimal::ZERO);
    }
}
