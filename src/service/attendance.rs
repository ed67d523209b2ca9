//! Attendance state machine and pay computation.
//!
//! Per worker and calendar day the record moves `NoRecord -> CheckedIn ->
//! CheckedOut`. Duplicate scans are absorbed rather than rejected: the
//! first check-in of the day wins, the latest check-out wins, and repeating
//! either with the same time leaves the record unchanged.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PolicyConfig;
use crate::error::{Error, Result};
use crate::model::attendance::{AttendanceStatus, DailyAttendanceRecord};
use crate::model::token::DailyQRToken;
use crate::model::worker::Worker;
use crate::qr::token::generate_daily_token;
use crate::store::{AttendanceStore, WorkerStore};

#[derive(Debug, Clone, Serialize)]
pub struct CheckInOutcome {
    pub status: AttendanceStatus,
    pub minutes_late: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutOutcome {
    pub hours_worked: f64,
    pub overtime_hours: f64,
    pub overtime_pay: f64,
    pub auto_checkout: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub worker_id: u64,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_hours: f64,
    pub total_overtime_hours: f64,
    pub total_overtime_pay: f64,
    pub late_days: u32,
    pub days_recorded: u32,
    pub days: Vec<DaySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub hours_worked: f64,
}

/// Record a check-in scan for `worker_id` at wall-clock time `at`.
///
/// If the day already has a check-in, the earlier of the two times is kept.
pub fn record_check_in<S>(
    store: &mut S,
    policy: &PolicyConfig,
    worker_id: u64,
    at: NaiveDateTime,
) -> Result<CheckInOutcome>
where
    S: WorkerStore + AttendanceStore,
{
    let worker = store
        .load_worker(worker_id)
        .ok_or(Error::WorkerNotFound(worker_id))?;

    let date = at.date();
    let time = at.time();
    let mut record = store
        .load_record(worker_id, date)
        .unwrap_or_else(|| DailyAttendanceRecord::new(worker_id, date));

    let effective = match record.check_in {
        Some(existing) if existing <= time => existing,
        _ => time,
    };
    record.check_in = Some(effective);

    let (status, minutes_late) = classify_check_in(effective, policy);
    record.status = status;
    record.minutes_late = minutes_late;

    // A check-in arriving after an auto check-out shifts the worked span.
    if record.check_out.is_some() {
        apply_worked_hours(&mut record, &worker, policy);
    }

    store.save_record(record);
    info!(worker_id, %date, %status, "check-in recorded");

    Ok(CheckInOutcome {
        status,
        minutes_late,
    })
}

/// Record a check-out scan for `worker_id` at wall-clock time `at`.
///
/// A day with no check-in gets one backfilled from policy, clamped to the
/// check-out time, and is flagged `auto_checkout` for audit.
pub fn record_check_out<S>(
    store: &mut S,
    policy: &PolicyConfig,
    worker_id: u64,
    at: NaiveDateTime,
) -> Result<CheckOutOutcome>
where
    S: WorkerStore + AttendanceStore,
{
    let worker = store
        .load_worker(worker_id)
        .ok_or(Error::WorkerNotFound(worker_id))?;

    let date = at.date();
    let time = at.time();
    let mut record = store
        .load_record(worker_id, date)
        .unwrap_or_else(|| DailyAttendanceRecord::new(worker_id, date));

    let check_in = if let Some(existing) = record.check_in {
        existing
    } else {
        let backfill = policy.missing_check_in_default.min(time);
        let (status, minutes_late) = classify_check_in(backfill, policy);
        record.check_in = Some(backfill);
        record.status = status;
        record.minutes_late = minutes_late;
        record.auto_checkout = true;
        warn!(worker_id, %date, %backfill, "check-out without check-in, backfilled");
        backfill
    };

    // Latest check-out wins; an earlier stray scan keeps the recorded one.
    let effective = match record.check_out {
        Some(existing) if existing >= time => existing,
        _ => time,
    };
    // A backfilled check-in may coincide with the check-out (zero-hour
    // day); a genuinely recorded one may not.
    if effective < check_in || (effective == check_in && !record.auto_checkout) {
        return Err(Error::CheckOutBeforeCheckIn {
            check_in,
            attempted: time,
        });
    }
    record.check_out = Some(effective);

    apply_worked_hours(&mut record, &worker, policy);
    let outcome = CheckOutOutcome {
        hours_worked: record.hours_worked,
        overtime_hours: record.overtime_hours,
        overtime_pay: record.overtime_pay,
        auto_checkout: record.auto_checkout,
    };

    store.save_record(record);
    info!(worker_id, %date, hours = outcome.hours_worked, "check-out recorded");

    Ok(outcome)
}

/// Aggregate one worker's records over the reporting week containing
/// `reference` (week-start day through the following six days, inclusive).
pub fn weekly_report<S>(
    store: &S,
    policy: &PolicyConfig,
    worker_id: u64,
    reference: NaiveDate,
) -> Result<WeeklyReport>
where
    S: WorkerStore + AttendanceStore,
{
    if store.load_worker(worker_id).is_none() {
        return Err(Error::WorkerNotFound(worker_id));
    }

    let (week_start, week_end) = week_bounds(reference, policy.week_start);
    let records = store.records_between(worker_id, week_start, week_end);

    let mut report = WeeklyReport {
        worker_id,
        week_start,
        week_end,
        total_hours: 0.0,
        total_overtime_hours: 0.0,
        total_overtime_pay: 0.0,
        late_days: 0,
        days_recorded: records.len() as u32,
        days: Vec::with_capacity(7),
    };

    for record in &records {
        report.total_hours += record.hours_worked;
        report.total_overtime_hours += record.overtime_hours;
        report.total_overtime_pay += record.overtime_pay;
        if record.status == AttendanceStatus::Late {
            report.late_days += 1;
        }
    }

    for day in week_start.iter_days().take(7) {
        let entry = records.iter().find(|r| r.date == day);
        report.days.push(DaySummary {
            date: day,
            status: entry.map_or(AttendanceStatus::Absent, |r| r.status),
            hours_worked: entry.map_or(0.0, |r| r.hours_worked),
        });
    }

    Ok(report)
}

/// Token for `worker_id`'s QR code on `today`.
pub fn daily_token<S>(
    store: &S,
    policy: &PolicyConfig,
    worker_id: u64,
    today: NaiveDate,
) -> Result<DailyQRToken>
where
    S: WorkerStore,
{
    let worker = store
        .load_worker(worker_id)
        .ok_or(Error::WorkerNotFound(worker_id))?;
    Ok(generate_daily_token(&worker, today, &policy.token_secret))
}

/// Start and end (inclusive) of the reporting week containing `reference`.
pub fn week_bounds(reference: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let offset =
        (reference.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    let start = reference - Days::new(u64::from(offset));
    (start, start + Days::new(6))
}

fn classify_check_in(time: NaiveTime, policy: &PolicyConfig) -> (AttendanceStatus, Option<u32>) {
    if time <= policy.day_start {
        return (AttendanceStatus::Early, None);
    }
    let late_by = minutes_of(time).saturating_sub(minutes_of(policy.day_start));
    if late_by < policy.grace_minutes {
        (AttendanceStatus::OnTime, None)
    } else {
        (AttendanceStatus::Late, Some(late_by))
    }
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn apply_worked_hours(record: &mut DailyAttendanceRecord, worker: &Worker, policy: &PolicyConfig) {
    let (Some(check_in), Some(check_out)) = (record.check_in, record.check_out) else {
        return;
    };

    let hours = (check_out - check_in).num_seconds() as f64 / 3600.0;
    record.hours_worked = hours;

    if hours > policy.standard_hours {
        let overtime = hours - policy.standard_hours;
        let hourly_rate =
            worker.daily_salary.unwrap_or(policy.default_daily_salary) / policy.standard_hours;
        let mut pay = overtime * hourly_rate * policy.overtime_surcharge;
        if record.date.weekday() == policy.weekend_day {
            pay *= policy.weekend_multiplier;
        }
        record.overtime_hours = overtime;
        record.overtime_pay = pay;
    } else {
        record.overtime_hours = 0.0;
        record.overtime_pay = 0.0;
    }
}
