//! One entry point per scan event: classify the decoded text, run the
//! matching operation, and fold the result into a structured outcome the
//! caller can persist, display, or forward to a notification channel.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::error::Error;
use crate::model::attendance::AttendanceStatus;
use crate::qr::interpreter::{ScanCommand, interpret};
use crate::qr::token::TokenValidity;
use crate::service::attendance::{record_check_in, record_check_out};
use crate::store::{AttendanceStore, EquipmentStore, WorkerStore};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanAction {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutcomeCode {
    Early,
    OnTime,
    Late,
    CheckedOut,
    OvertimeRegistered,
    TokenTampered,
    TokenExpired,
    UnknownWorker,
    UnknownEquipment,
    EquipmentScanned,
    Rejected,
    Unrecognized,
}

/// What a single scan amounted to; numeric fields are present where the
/// code implies them.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub code: OutcomeCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_late: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_pay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ScanOutcome {
    fn new(code: OutcomeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            worker_id: None,
            minutes_late: None,
            hours_worked: None,
            overtime_hours: None,
            overtime_pay: None,
            equipment_id: None,
            raw: None,
        }
    }
}

/// Run one decoded scan through the interpreter and the matching operation.
///
/// Never fails: every path, including junk input and unknown ids, comes
/// back as an outcome.
pub fn handle_scan<S>(
    store: &mut S,
    policy: &PolicyConfig,
    raw: &str,
    action: ScanAction,
    now: NaiveDateTime,
) -> ScanOutcome
where
    S: WorkerStore + AttendanceStore + EquipmentStore,
{
    let command = interpret(raw, now, policy);
    debug!(?command, ?action, "scan interpreted");

    match command {
        ScanCommand::Attendance {
            worker_id,
            validity: TokenValidity::Valid,
        } => attendance_outcome(store, policy, worker_id, action, now),
        ScanCommand::Attendance {
            worker_id,
            validity: TokenValidity::Tampered,
        } => {
            let mut outcome = ScanOutcome::new(
                OutcomeCode::TokenTampered,
                "Attendance code failed verification",
            );
            outcome.worker_id = Some(worker_id);
            outcome
        }
        ScanCommand::Attendance {
            worker_id,
            validity: TokenValidity::Expired,
        } => {
            let mut outcome = ScanOutcome::new(
                OutcomeCode::TokenExpired,
                "Attendance code has expired, ask for a fresh one",
            );
            outcome.worker_id = Some(worker_id);
            outcome
        }
        ScanCommand::Equipment { equipment_id } => equipment_outcome(store, equipment_id),
        ScanCommand::Unrecognized { raw } => {
            let mut outcome = ScanOutcome::new(
                OutcomeCode::Unrecognized,
                "Unrecognized code, enter manually",
            );
            outcome.raw = Some(raw);
            outcome
        }
    }
}

fn attendance_outcome<S>(
    store: &mut S,
    policy: &PolicyConfig,
    worker_id: u64,
    action: ScanAction,
    now: NaiveDateTime,
) -> ScanOutcome
where
    S: WorkerStore + AttendanceStore,
{
    let time = now.time().format("%H:%M");
    let result = match action {
        ScanAction::CheckIn => {
            record_check_in(store, policy, worker_id, now).map(|checked_in| {
                let (code, message) = match checked_in.status {
                    AttendanceStatus::Late => (
                        OutcomeCode::Late,
                        format!(
                            "Checked in at {time}, late by {} min",
                            checked_in.minutes_late.unwrap_or(0)
                        ),
                    ),
                    AttendanceStatus::OnTime => {
                        (OutcomeCode::OnTime, format!("Checked in at {time}"))
                    }
                    _ => (OutcomeCode::Early, format!("Checked in at {time}, early")),
                };
                let mut outcome = ScanOutcome::new(code, message);
                outcome.minutes_late = checked_in.minutes_late;
                outcome
            })
        }
        ScanAction::CheckOut => {
            record_check_out(store, policy, worker_id, now).map(|checked_out| {
                let (code, mut message) = if checked_out.overtime_hours > 0.0 {
                    (
                        OutcomeCode::OvertimeRegistered,
                        format!(
                            "Checked out at {time}: {:.2} h worked, {:.2} h overtime, pay {:.2}",
                            checked_out.hours_worked,
                            checked_out.overtime_hours,
                            checked_out.overtime_pay
                        ),
                    )
                } else {
                    (
                        OutcomeCode::CheckedOut,
                        format!(
                            "Checked out at {time}: {:.2} h worked",
                            checked_out.hours_worked
                        ),
                    )
                };
                if checked_out.auto_checkout {
                    message.push_str(" (check-in was backfilled)");
                }
                let mut outcome = ScanOutcome::new(code, message);
                outcome.hours_worked = Some(checked_out.hours_worked);
                outcome.overtime_hours = Some(checked_out.overtime_hours);
                outcome.overtime_pay = Some(checked_out.overtime_pay);
                outcome
            })
        }
    };

    let mut outcome = match result {
        Ok(outcome) => outcome,
        Err(Error::WorkerNotFound(id)) => ScanOutcome::new(
            OutcomeCode::UnknownWorker,
            format!("Worker {id} is not registered"),
        ),
        Err(e) => ScanOutcome::new(OutcomeCode::Rejected, e.to_string()),
    };
    outcome.worker_id = Some(worker_id);
    outcome
}

fn equipment_outcome<S: EquipmentStore>(store: &S, equipment_id: u64) -> ScanOutcome {
    let mut outcome = match store.load_equipment(equipment_id) {
        Some(equipment) => {
            let whereabouts = match equipment.holder {
                Some(worker_id) => format!("{}, held by worker {worker_id}", equipment.status),
                None => equipment.status.to_string(),
            };
            ScanOutcome::new(
                OutcomeCode::EquipmentScanned,
                format!("{} is {whereabouts}", equipment.name),
            )
        }
        None => ScanOutcome::new(
            OutcomeCode::UnknownEquipment,
            format!("Equipment {equipment_id} is not registered"),
        ),
    };
    outcome.equipment_id = Some(equipment_id);
    outcome
}
