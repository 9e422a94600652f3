//! Single-pass HOS trip simulation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::domain::{DutyStatus, Segment, SegmentKind, TripInput, TripPlan, TripSummary};

use super::config::HosConfig;
use super::daily_log::build_daily_logs;
use super::state::SimulationState;

/// Plan a trip: simulate it segment by segment, then build the daily logs
/// and summary.
///
/// The result depends only on `input` and `config`, so planning the same
/// trip twice gives identical output.
pub fn plan_trip(input: &TripInput, config: &HosConfig) -> TripPlan {
    let segments = simulate(input, config);
    let daily_logs = build_daily_logs(&segments, config.day_boundary);
    let summary = summarize(input, &segments);

    debug!(
        miles = %input.total_miles(),
        segments = segments.len(),
        days = daily_logs.len(),
        fuel_stops = summary.fuel_stops,
        resets = summary.required_rest_stops,
        "planned trip"
    );

    TripPlan {
        segments,
        daily_logs,
        summary,
    }
}

/// Produce the ordered segment list, pickup first and dropoff last.
pub fn simulate(input: &TripInput, config: &HosConfig) -> Vec<Segment> {
    let mut segments = Vec::new();

    let start = SimulationState::new(input.start_time(), input.total_miles());
    let (pickup, mut state) = start.on_duty_stop(
        SegmentKind::Pickup,
        config.pickup_dropoff_hours,
        input.pickup_label(),
    );
    segments.push(pickup);

    while !state.is_complete() {
        let action = state.next_action(config);
        let (segment, next) = state.apply(action, config);
        trace!(seq = segment.sequence, kind = %segment.kind, ?action, "emitted segment");
        segments.push(segment);
        state = next;
    }

    let (dropoff, _) = state.on_duty_stop(
        SegmentKind::Dropoff,
        config.pickup_dropoff_hours,
        input.dropoff_label(),
    );
    segments.push(dropoff);

    segments
}

fn summarize(input: &TripInput, segments: &[Segment]) -> TripSummary {
    let count = |kind: SegmentKind| segments.iter().filter(|s| s.kind == kind).count();

    let on_duty = sum_hours(segments, |s| {
        matches!(
            s.kind.duty_status(),
            DutyStatus::Driving | DutyStatus::OnDutyNotDriving
        )
    });

    TripSummary {
        total_distance_miles: input.total_miles(),
        total_driving_hours: sum_hours(segments, Segment::is_driving),
        fuel_stops: count(SegmentKind::Fuel),
        required_rest_stops: count(SegmentKind::SleeperBerth),
        rest_breaks: count(SegmentKind::RestBreak30),
        total_trip_hours: sum_hours(segments, |_| true),
        estimated_arrival: arrival(input, segments),
        projected_cycle_hours: input.cycle_hours_used() + on_duty,
    }
}

fn sum_hours(segments: &[Segment], pred: impl Fn(&Segment) -> bool) -> Decimal {
    segments
        .iter()
        .filter(|s| pred(s))
        .map(|s| s.duration_hours)
        .sum()
}

fn arrival(input: &TripInput, segments: &[Segment]) -> DateTime<Utc> {
    segments
        .last()
        .map(|s| s.end_time)
        .unwrap_or_else(|| input.start_time())
}
