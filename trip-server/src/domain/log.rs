//! ELD daily log types.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Duty status as recorded on an ELD grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDutyNotDriving,
}

impl DutyStatus {
    pub fn code(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDutyNotDriving => "on_duty_not_driving",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDutyNotDriving => "On Duty (Not Driving)",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One row of a day's ELD grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub duty_status: DutyStatus,

    /// Fractional hour-of-day the activity starts.
    pub start_hour: Decimal,

    /// Fractional hour-of-day the activity ends. 24.0 when the entry runs
    /// to midnight.
    pub end_hour: Decimal,

    pub location: String,
}

/// All activity of a trip that falls on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogDay {
    pub date: NaiveDate,

    /// 1-based, in order of first appearance.
    pub day_number: u32,

    pub driving_hours: Decimal,
    pub on_duty_not_driving_hours: Decimal,
    pub sleeper_berth_hours: Decimal,
    pub off_duty_hours: Decimal,

    pub total_miles: Decimal,

    pub entries: Vec<LogEntry>,
}

impl DailyLogDay {
    /// Create an empty day.
    pub fn new(date: NaiveDate, day_number: u32) -> Self {
        Self {
            date,
            day_number,
            driving_hours: Decimal::ZERO,
            on_duty_not_driving_hours: Decimal::ZERO,
            sleeper_berth_hours: Decimal::ZERO,
            off_duty_hours: Decimal::ZERO,
            total_miles: Decimal::ZERO,
            entries: Vec::new(),
        }
    }

    /// Add hours to the bucket for a duty status.
    pub fn add_hours(&mut self, status: DutyStatus, hours: Decimal) {
        let bucket = match status {
            DutyStatus::Driving => &mut self.driving_hours,
            DutyStatus::OnDutyNotDriving => &mut self.on_duty_not_driving_hours,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth_hours,
            DutyStatus::OffDuty => &mut self.off_duty_hours,
        };
        *bucket += hours;
    }

    /// Sum of the four duty-status totals.
    pub fn total_hours(&self) -> Decimal {
        self.driving_hours
            + self.on_duty_not_driving_hours
            + self.sleeper_berth_hours
            + self.off_duty_hours
    }
}
