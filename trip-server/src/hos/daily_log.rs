//! Calendar-day partitioning of trip segments into ELD daily logs.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    DailyLogDay, DutyStatus, LogEntry, Segment, duration_to_hours, hour_of_day, round_hours,
    round_miles,
};

use super::config::DayBoundary;

const HOURS_PER_DAY: Decimal = dec!(24);

/// The part of a segment that lands on one calendar date.
#[derive(Debug, Clone, PartialEq)]
struct DayPiece {
    date: NaiveDate,
    start_hour: Decimal,
    end_hour: Decimal,
    hours: Decimal,
    miles: Decimal,
}

/// Ordered day buckets with a date lookup alongside.
#[derive(Debug, Default)]
struct DayBook {
    days: Vec<DailyLogDay>,
    by_date: HashMap<NaiveDate, usize>,
}

impl DayBook {
    fn day_mut(&mut self, date: NaiveDate) -> &mut DailyLogDay {
        let idx = match self.by_date.get(&date) {
            Some(&idx) => idx,
            None => {
                let idx = self.days.len();
                self.days.push(DailyLogDay::new(date, idx as u32 + 1));
                self.by_date.insert(date, idx);
                idx
            }
        };
        &mut self.days[idx]
    }

    fn record(&mut self, status: DutyStatus, piece: DayPiece, location: &str) {
        let day = self.day_mut(piece.date);
        day.add_hours(status, piece.hours);
        if status == DutyStatus::Driving {
            day.total_miles += piece.miles;
        }
        day.entries.push(LogEntry {
            duty_status: status,
            start_hour: piece.start_hour,
            end_hour: piece.end_hour,
            location: location.to_string(),
        });
    }

    fn finish(self) -> Vec<DailyLogDay> {
        let mut days = self.days;
        for day in &mut days {
            let total = day.total_hours();
            if total < HOURS_PER_DAY {
                day.off_duty_hours += HOURS_PER_DAY - total;
            }
        }
        days
    }
}

/// Partition segments into daily logs.
///
/// Segments must be in chronological order. Days are numbered in order of
/// first appearance and each day's off-duty total is padded so the four
/// duty-status totals reach 24 hours.
pub fn build_daily_logs(segments: &[Segment], boundary: DayBoundary) -> Vec<DailyLogDay> {
    let mut book = DayBook::default();

    for segment in segments {
        let status = segment.kind.duty_status();
        let pieces = match boundary {
            DayBoundary::StartDate => vec![whole_segment(segment)],
            DayBoundary::SplitAtMidnight => split_at_midnight(segment),
        };
        for piece in pieces {
            book.record(status, piece, &segment.location);
        }
    }

    book.finish()
}

/// The whole segment attributed to its start date.
fn whole_segment(segment: &Segment) -> DayPiece {
    DayPiece {
        date: segment.start_time.date_naive(),
        start_hour: hour_of_day(segment.start_time),
        end_hour: hour_of_day(segment.end_time),
        hours: segment.duration_hours,
        miles: segment.distance_miles,
    }
}

/// Cut a segment at every midnight it crosses.
///
/// The last piece takes whatever hours and miles the earlier pieces did not,
/// so the pieces always sum to the segment's reported totals.
fn split_at_midnight(segment: &Segment) -> Vec<DayPiece> {
    if segment.end_time <= next_midnight(segment.start_time) {
        let mut piece = whole_segment(segment);
        if segment.end_time.date_naive() != segment.start_time.date_naive() {
            piece.end_hour = HOURS_PER_DAY;
        }
        return vec![piece];
    }

    let total_millis = Decimal::from(segment.elapsed().num_milliseconds());
    let mut pieces = Vec::new();
    let mut cursor = segment.start_time;
    let mut hours_left = segment.duration_hours;
    let mut miles_left = segment.distance_miles;

    while cursor < segment.end_time {
        let midnight = next_midnight(cursor);
        if segment.end_time <= midnight {
            pieces.push(DayPiece {
                date: cursor.date_naive(),
                start_hour: hour_of_day(cursor),
                end_hour: if segment.end_time == midnight {
                    HOURS_PER_DAY
                } else {
                    hour_of_day(segment.end_time)
                },
                hours: hours_left,
                miles: miles_left,
            });
            break;
        }

        let span = midnight - cursor;
        let hours = round_hours(duration_to_hours(span));
        let miles = if total_millis > Decimal::ZERO {
            round_miles(
                segment.distance_miles * Decimal::from(span.num_milliseconds()) / total_millis,
            )
        } else {
            Decimal::ZERO
        };
        pieces.push(DayPiece {
            date: cursor.date_naive(),
            start_hour: hour_of_day(cursor),
            end_hour: HOURS_PER_DAY,
            hours,
            miles,
        });
        hours_left -= hours;
        miles_left -= miles;
        cursor = midnight;
    }

    pieces
}

/// The first midnight strictly after `time`.
fn next_midnight(time: DateTime<Utc>) -> DateTime<Utc> {
    time.date_naive()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
