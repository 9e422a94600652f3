//! Askama templates for the web frontend.

use askama::Template;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{DailyLogDay, LogEntry, Segment};
use crate::store::StoredTrip;

use super::dto::{format_date, format_timestamp};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form and recent trips.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub trips: Vec<TripListItem>,
}

/// A single trip with its ELD log sheets.
#[derive(Template)]
#[template(path = "trip.html")]
pub struct TripTemplate {
    pub trip: TripView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One row of the recent-trips table.
#[derive(Debug, Clone)]
pub struct TripListItem {
    pub id: u64,
    pub route: String,
    pub distance: String,
    pub duration: String,
    pub created: String,
}

impl TripListItem {
    pub fn from_trip(trip: &StoredTrip) -> Self {
        Self {
            id: trip.id,
            route: format!(
                "{} → {} → {}",
                trip.current_location.name, trip.pickup_location.name, trip.dropoff_location.name
            ),
            distance: format!("{} mi", trip.plan.summary.total_distance_miles),
            duration: format!("{} h", trip.plan.summary.total_trip_hours),
            created: format_timestamp(&trip.created_at),
        }
    }
}

/// Trip view model for templates.
#[derive(Debug, Clone)]
pub struct TripView {
    pub id: u64,
    pub current: String,
    pub pickup: String,
    pub dropoff: String,
    pub cycle_used: String,
    pub total_distance: String,
    pub total_driving_hours: String,
    pub total_trip_hours: String,
    pub fuel_stops: usize,
    pub rest_stops: usize,
    pub rest_breaks: usize,
    pub arrival: String,
    pub projected_cycle_hours: String,
    pub exceeds_cycle_limit: bool,
    pub segments: Vec<SegmentView>,
    pub days: Vec<DayView>,
}

impl TripView {
    pub fn from_trip(trip: &StoredTrip) -> Self {
        let summary = &trip.plan.summary;
        Self {
            id: trip.id,
            current: trip.current_location.name.clone(),
            pickup: trip.pickup_location.name.clone(),
            dropoff: trip.dropoff_location.name.clone(),
            cycle_used: trip.cycle_hours_used.to_string(),
            total_distance: summary.total_distance_miles.to_string(),
            total_driving_hours: summary.total_driving_hours.to_string(),
            total_trip_hours: summary.total_trip_hours.to_string(),
            fuel_stops: summary.fuel_stops,
            rest_stops: summary.required_rest_stops,
            rest_breaks: summary.rest_breaks,
            arrival: format_timestamp(&summary.estimated_arrival),
            projected_cycle_hours: summary.projected_cycle_hours.to_string(),
            exceeds_cycle_limit: summary.exceeds_cycle_limit(),
            segments: trip
                .plan
                .segments
                .iter()
                .map(SegmentView::from_segment)
                .collect(),
            days: trip.plan.daily_logs.iter().map(DayView::from_day).collect(),
        }
    }
}

/// Segment view model for templates.
#[derive(Debug, Clone)]
pub struct SegmentView {
    pub sequence: u32,
    pub kind: &'static str,
    pub kind_display: &'static str,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub miles: Option<String>,
    pub location: String,
}

impl SegmentView {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            sequence: segment.sequence,
            kind: segment.kind.code(),
            kind_display: segment.kind.display_name(),
            start: format_timestamp(&segment.start_time),
            end: format_timestamp(&segment.end_time),
            duration: segment.duration_hours.to_string(),
            miles: segment
                .is_driving()
                .then(|| segment.distance_miles.to_string()),
            location: segment.location.clone(),
        }
    }
}

/// One log sheet.
#[derive(Debug, Clone)]
pub struct DayView {
    pub date: String,
    pub day_number: u32,
    pub total_miles: String,
    pub off_duty: String,
    pub sleeper_berth: String,
    pub driving: String,
    pub on_duty: String,
    pub entries: Vec<EntryView>,
}

impl DayView {
    pub fn from_day(day: &DailyLogDay) -> Self {
        Self {
            date: format_date(&day.date),
            day_number: day.day_number,
            total_miles: day.total_miles.to_string(),
            off_duty: day.off_duty_hours.to_string(),
            sleeper_berth: day.sleeper_berth_hours.to_string(),
            driving: day.driving_hours.to_string(),
            on_duty: day.on_duty_not_driving_hours.to_string(),
            entries: day.entries.iter().map(EntryView::from_entry).collect(),
        }
    }
}

/// A bar on the 24-hour grid.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub status: &'static str,
    pub status_display: &'static str,
    pub start_hour: String,
    pub end_hour: String,
    pub location: String,
    /// CSS `left` offset as a percentage of the day.
    pub left_pct: String,
    /// CSS `width` as a percentage of the day.
    pub width_pct: String,
}

impl EntryView {
    pub fn from_entry(entry: &LogEntry) -> Self {
        // A start-date entry may wrap past midnight; draw it to the edge.
        let end = if entry.end_hour < entry.start_hour {
            dec!(24)
        } else {
            entry.end_hour
        };
        Self {
            status: entry.duty_status.code(),
            status_display: entry.duty_status.display_name(),
            start_hour: entry.start_hour.to_string(),
            end_hour: entry.end_hour.to_string(),
            location: entry.location.clone(),
            left_pct: percent_of_day(entry.start_hour),
            width_pct: percent_of_day(end - entry.start_hour),
        }
    }
}

fn percent_of_day(hours: Decimal) -> String {
    (hours * dec!(100) / dec!(24))
        .round_dp(3)
        .normalize()
        .to_string()
}
