//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DailyLogDay, DutyStatus, LogEntry, NamedLocation, Segment, SegmentKind};
use crate::store::StoredTrip;
use crate::trips::{PlaceRequest, TripRequest};

/// A location in a trip request.
#[derive(Debug, Deserialize)]
pub struct LocationInput {
    /// Display name, also used for geocoding when `coords` is absent
    pub name: String,

    /// `[longitude, latitude]`
    #[serde(default)]
    pub coords: Option<Vec<f64>>,
}

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub current_location: LocationInput,
    pub pickup_location: LocationInput,
    pub dropoff_location: LocationInput,

    /// Hours already used in the 70-hour/8-day cycle
    pub current_cycle_used: Decimal,

    /// Trip start time (defaults to now)
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

impl CreateTripRequest {
    pub fn into_request(self) -> TripRequest {
        TripRequest {
            current_location: self.current_location.into(),
            pickup_location: self.pickup_location.into(),
            dropoff_location: self.dropoff_location.into(),
            cycle_hours_used: self.current_cycle_used,
            start_time: self.start_time,
        }
    }
}

impl From<LocationInput> for PlaceRequest {
    fn from(input: LocationInput) -> Self {
        PlaceRequest {
            name: input.name,
            coords: input.coords,
        }
    }
}

/// Query for place autocomplete.
#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: String,
}

/// Response for place autocomplete.
#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<LocationResult>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// A named location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationResult {
    pub name: String,

    /// `[longitude, latitude]`
    pub coords: [f64; 2],
}

impl LocationResult {
    pub fn from_location(location: &NamedLocation) -> Self {
        Self {
            name: location.name.clone(),
            coords: location.coordinates.as_pair(),
        }
    }
}

/// A planned trip.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub id: u64,
    pub current_location: LocationResult,
    pub pickup_location: LocationResult,
    pub dropoff_location: LocationResult,
    pub current_cycle_used: Decimal,

    /// Route distance in miles
    pub total_distance: Decimal,

    /// Elapsed trip time in hours, pickup to dropoff
    pub total_duration: Decimal,

    pub fuel_stops: usize,
    pub required_rest_stops: usize,
    pub segments: Vec<SegmentResult>,
    pub daily_logs: Vec<DailyLogResult>,
    pub summary: SummaryResult,
    pub route_summary: RouteSummaryResult,
    pub created_at: DateTime<Utc>,
}

/// One activity in a trip.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub segment_type: SegmentKind,

    /// Human-readable segment type, e.g. "30-min Rest Break"
    pub segment_type_display: &'static str,

    pub sequence_number: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Start time as `MM/DD/YYYY HH:MM`
    pub formatted_start_time: String,

    /// End time as `MM/DD/YYYY HH:MM`
    pub formatted_end_time: String,

    pub duration_hours: Decimal,
    pub distance_miles: Decimal,
    pub location: String,
}

/// One calendar day of the ELD log.
#[derive(Debug, Serialize)]
pub struct DailyLogResult {
    pub log_date: NaiveDate,

    /// Date as `MM/DD/YYYY`
    pub formatted_date: String,

    pub day_number: u32,
    pub total_miles: Decimal,
    pub off_duty_hours: Decimal,
    pub sleeper_berth_hours: Decimal,
    pub driving_hours: Decimal,

    /// On-duty hours spent not driving
    pub on_duty_hours: Decimal,

    pub entries: Vec<LogEntryResult>,
}

/// A row of the ELD grid.
#[derive(Debug, Serialize)]
pub struct LogEntryResult {
    pub duty_status: DutyStatus,
    pub duty_status_display: &'static str,
    pub start_hour: Decimal,
    pub end_hour: Decimal,
    pub location: String,
}

/// Trip totals.
#[derive(Debug, Serialize)]
pub struct SummaryResult {
    pub total_distance_miles: Decimal,
    pub total_driving_hours: Decimal,
    pub total_trip_hours: Decimal,
    pub fuel_stops: usize,
    pub required_rest_stops: usize,
    pub rest_breaks: usize,
    pub estimated_arrival: DateTime<Utc>,
    pub formatted_arrival: String,
    pub projected_cycle_hours: Decimal,
    pub exceeds_cycle_limit: bool,
}

/// Route information for map display.
#[derive(Debug, Serialize)]
pub struct RouteSummaryResult {
    pub origin: LocationResult,
    pub destination: LocationResult,
    pub waypoints: Vec<LocationResult>,
    pub total_distance_miles: Decimal,
    pub estimated_duration_hours: Decimal,
    pub fuel_stops_needed: usize,
    pub rest_stops_needed: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl TripResult {
    /// Create from a stored trip.
    pub fn from_trip(trip: &StoredTrip) -> Self {
        let summary = &trip.plan.summary;
        let current = LocationResult::from_location(&trip.current_location);
        let pickup = LocationResult::from_location(&trip.pickup_location);
        let dropoff = LocationResult::from_location(&trip.dropoff_location);

        Self {
            id: trip.id,
            route_summary: RouteSummaryResult {
                origin: current.clone(),
                destination: dropoff.clone(),
                waypoints: vec![pickup.clone()],
                total_distance_miles: summary.total_distance_miles,
                estimated_duration_hours: summary.total_trip_hours,
                fuel_stops_needed: summary.fuel_stops,
                rest_stops_needed: summary.required_rest_stops,
            },
            current_location: current,
            pickup_location: pickup,
            dropoff_location: dropoff,
            current_cycle_used: trip.cycle_hours_used,
            total_distance: summary.total_distance_miles,
            total_duration: summary.total_trip_hours,
            fuel_stops: summary.fuel_stops,
            required_rest_stops: summary.required_rest_stops,
            segments: trip
                .plan
                .segments
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
            daily_logs: trip
                .plan
                .daily_logs
                .iter()
                .map(DailyLogResult::from_day)
                .collect(),
            summary: SummaryResult {
                total_distance_miles: summary.total_distance_miles,
                total_driving_hours: summary.total_driving_hours,
                total_trip_hours: summary.total_trip_hours,
                fuel_stops: summary.fuel_stops,
                required_rest_stops: summary.required_rest_stops,
                rest_breaks: summary.rest_breaks,
                estimated_arrival: summary.estimated_arrival,
                formatted_arrival: format_timestamp(&summary.estimated_arrival),
                projected_cycle_hours: summary.projected_cycle_hours,
                exceeds_cycle_limit: summary.exceeds_cycle_limit(),
            },
            created_at: trip.created_at,
        }
    }
}

impl SegmentResult {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            segment_type: segment.kind,
            segment_type_display: segment.kind.display_name(),
            sequence_number: segment.sequence,
            start_time: segment.start_time,
            end_time: segment.end_time,
            formatted_start_time: format_timestamp(&segment.start_time),
            formatted_end_time: format_timestamp(&segment.end_time),
            duration_hours: segment.duration_hours,
            distance_miles: segment.distance_miles,
            location: segment.location.clone(),
        }
    }
}

impl DailyLogResult {
    pub fn from_day(day: &DailyLogDay) -> Self {
        Self {
            log_date: day.date,
            formatted_date: format_date(&day.date),
            day_number: day.day_number,
            total_miles: day.total_miles,
            off_duty_hours: day.off_duty_hours,
            sleeper_berth_hours: day.sleeper_berth_hours,
            driving_hours: day.driving_hours,
            on_duty_hours: day.on_duty_not_driving_hours,
            entries: day.entries.iter().map(LogEntryResult::from_entry).collect(),
        }
    }
}

impl LogEntryResult {
    pub fn from_entry(entry: &LogEntry) -> Self {
        Self {
            duty_status: entry.duty_status,
            duty_status_display: entry.duty_status.display_name(),
            start_hour: entry.start_hour,
            end_hour: entry.end_hour,
            location: entry.location.clone(),
        }
    }
}

/// Format a timestamp as `MM/DD/YYYY HH:MM`.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%m/%d/%Y %H:%M").to_string()
}

/// Format a date as `MM/DD/YYYY`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, TripInput};
    use crate::hos::{HosConfig, plan_trip};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn place(name: &str, lon: f64, lat: f64) -> NamedLocation {
        NamedLocation::new(name, Coordinates::new(lon, lat).unwrap())
    }

    fn stored_trip(miles: Decimal) -> StoredTrip {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let input = TripInput::new(start, miles, dec!(20), "Joliet, IL", "Denver, CO").unwrap();
        StoredTrip {
            id: 7,
            created_at: start,
            current_location: place("Chicago, IL", -87.63, 41.88),
            pickup_location: place("Joliet, IL", -88.08, 41.53),
            dropoff_location: place("Denver, CO", -104.99, 39.74),
            cycle_hours_used: dec!(20),
            plan: plan_trip(&input, &HosConfig::default()),
        }
    }

    #[test]
    fn trip_result_from_trip() {
        let result = TripResult::from_trip(&stored_trip(dec!(1200)));

        assert_eq!(result.id, 7);
        assert_eq!(result.current_cycle_used, dec!(20));
        assert_eq!(result.total_distance, dec!(1200));
        assert_eq!(result.total_duration, dec!(35.32));
        assert_eq!(result.fuel_stops, 1);
        assert_eq!(result.required_rest_stops, 1);
        assert_eq!(result.segments.len(), 12);
        assert_eq!(result.daily_logs.len(), 2);
        assert_eq!(result.summary.rest_breaks, 2);
        assert!(!result.summary.exceeds_cycle_limit);
    }

    #[test]
    fn route_summary_lists_pickup_as_waypoint() {
        let result = TripResult::from_trip(&stored_trip(dec!(300)));
        let route = &result.route_summary;

        assert_eq!(route.origin.name, "Chicago, IL");
        assert_eq!(route.destination.name, "Denver, CO");
        assert_eq!(route.waypoints.len(), 1);
        assert_eq!(route.waypoints[0].name, "Joliet, IL");
        assert_eq!(route.waypoints[0].coords, [-88.08, 41.53]);
        assert_eq!(route.estimated_duration_hours, dec!(7.45));
    }

    #[test]
    fn segment_result_fields() {
        let result = TripResult::from_trip(&stored_trip(dec!(1200)));

        let pickup = &result.segments[0];
        assert_eq!(pickup.segment_type, SegmentKind::Pickup);
        assert_eq!(pickup.sequence_number, 1);
        assert_eq!(pickup.formatted_start_time, "03/15/2024 08:00");
        assert_eq!(pickup.formatted_end_time, "03/15/2024 09:00");
        assert_eq!(pickup.location, "Joliet, IL");

        let rest = &result.segments[3];
        assert_eq!(rest.segment_type_display, "30-min Rest Break");
    }

    #[test]
    fn daily_log_result_fields() {
        let result = TripResult::from_trip(&stored_trip(dec!(1200)));

        let day = &result.daily_logs[1];
        assert_eq!(day.formatted_date, "03/16/2024");
        assert_eq!(day.day_number, 2);
        assert_eq!(day.on_duty_hours, dec!(1.5));
        assert_eq!(day.entries[0].duty_status, DutyStatus::SleeperBerth);
        assert_eq!(day.entries[0].duty_status_display, "Sleeper Berth");
    }

    #[test]
    fn trip_json_shape() {
        let result = TripResult::from_trip(&stored_trip(dec!(300)));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["segments"][0]["segment_type"], "pickup");
        assert_eq!(json["segments"][1]["segment_type_display"], "Driving");
        let miles = json["segments"][1]["distance_miles"].as_str().unwrap();
        assert_eq!(miles.parse::<Decimal>().unwrap(), dec!(220));
        assert_eq!(json["daily_logs"][0]["log_date"], "2024-03-15");
        assert_eq!(
            json["daily_logs"][0]["entries"][0]["duty_status"],
            "on_duty_not_driving"
        );
        assert_eq!(json["current_location"]["coords"][0], -87.63);
        assert_eq!(json["created_at"], "2024-03-15T08:00:00Z");
    }

    #[test]
    fn create_request_parses_numbers_and_optional_coords() {
        let body = r#"{
            "current_location": {"name": "Chicago, IL", "coords": [-87.63, 41.88]},
            "pickup_location": {"name": "Joliet, IL"},
            "dropoff_location": {"name": "Denver, CO", "coords": [-104.99, 39.74]},
            "current_cycle_used": 12.5
        }"#;

        let request: CreateTripRequest = serde_json::from_str(body).unwrap();
        let request = request.into_request();

        assert_eq!(request.cycle_hours_used, dec!(12.5));
        assert_eq!(request.pickup_location, PlaceRequest::named("Joliet, IL"));
        assert_eq!(request.current_location.coords, Some(vec![-87.63, 41.88]));
        assert!(request.start_time.is_none());
    }

    #[test]
    fn create_request_accepts_start_time() {
        let body = r#"{
            "current_location": {"name": "A", "coords": [0, 0]},
            "pickup_location": {"name": "B", "coords": [1, 1]},
            "dropoff_location": {"name": "C", "coords": [2, 2]},
            "current_cycle_used": "0",
            "start_time": "2024-03-15T06:30:00Z"
        }"#;

        let request: CreateTripRequest = serde_json::from_str(body).unwrap();
        assert_eq!(
            request.start_time,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn format_helpers() {
        let t = Utc.with_ymd_and_hms(2024, 1, 5, 9, 7, 59).unwrap();
        assert_eq!(format_timestamp(&t), "01/05/2024 09:07");
        assert_eq!(format_date(&t.date_naive()), "01/05/2024");
    }
}
