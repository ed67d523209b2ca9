use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One attendance record per worker per calendar day, created on the first
/// scan event and updated in place afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAttendanceRecord {
    pub worker_id: u64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    /// Whole minutes past the day-start boundary, present only for late
    /// arrivals. Seconds are truncated.
    pub minutes_late: Option<u32>,
    pub hours_worked: f64,
    pub overtime_hours: f64,
    pub overtime_pay: f64,
    /// Set when the check-in was backfilled because the first event of the
    /// day was a check-out.
    pub auto_checkout: bool,
}

impl DailyAttendanceRecord {
    pub fn new(worker_id: u64, date: NaiveDate) -> Self {
        Self {
            worker_id,
            date,
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Absent,
            minutes_late: None,
            hours_worked: 0.0,
            overtime_hours: 0.0,
            overtime_pay: 0.0,
            auto_checkout: false,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AttendanceStatus {
    Early,
    /// Arrived inside the configured grace window after the day start.
    OnTime,
    Late,
    Absent,
}
