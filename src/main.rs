//! Scanner console: a stdin stand-in for the camera collaborator.
//!
//! Seeds a few workers and tools, prints their scannable payloads, then
//! treats every stdin line as one decoded scan. Attendance scans toggle
//! between check-in and check-out from the day's record; an available tool
//! scanned after a worker badge is loaned to that worker, a loaned tool is
//! returned.

use std::io::{self, BufRead};

use chrono::{Local, NaiveDateTime};
use dotenvy::dotenv;
use serde_json::json;
use tracing::info;
use tracing_appender::rolling;

use toolroom::config::PolicyConfig;
use toolroom::model::equipment::EquipmentStatus;
use toolroom::qr::interpreter::{ScanCommand, interpret};
use toolroom::service::attendance::daily_token;
use toolroom::service::equipment::{
    RegisterEquipment, loan_equipment, register_equipment, return_equipment,
};
use toolroom::service::scan::{ScanAction, handle_scan};
use toolroom::service::worker::{CreateWorker, create_worker};
use toolroom::store::{AttendanceStore, EquipmentStore, InMemoryStore};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let policy = PolicyConfig::from_env();

    // Rolling daily log; stdout stays clean for scan outcomes.
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .init();

    info!("Scanner console starting...");

    let mut store = InMemoryStore::new();
    seed(&mut store, &policy)?;

    let mut last_worker: Option<u64> = None;
    for line in io::stdin().lock().lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "exit" || text == "quit" {
            break;
        }

        let now = Local::now().naive_local();
        let printed = match interpret(text, now, &policy) {
            ScanCommand::Equipment { equipment_id } => {
                match equipment_action(&mut store, equipment_id, last_worker, now) {
                    Some(value) => value,
                    None => serde_json::to_value(handle_scan(
                        &mut store,
                        &policy,
                        text,
                        ScanAction::CheckIn,
                        now,
                    ))?,
                }
            }
            ScanCommand::Attendance {
                worker_id,
                validity,
            } if validity.is_valid() => {
                let action = match store.load_record(worker_id, now.date()) {
                    Some(record) if record.check_in.is_some() => ScanAction::CheckOut,
                    _ => ScanAction::CheckIn,
                };
                let outcome = handle_scan(&mut store, &policy, text, action, now);
                last_worker = Some(worker_id);
                serde_json::to_value(outcome)?
            }
            _ => serde_json::to_value(handle_scan(
                &mut store,
                &policy,
                text,
                ScanAction::CheckIn,
                now,
            ))?,
        };
        println!("{printed}");
    }

    info!("Scanner console stopped");
    Ok(())
}

fn seed(store: &mut InMemoryStore, policy: &PolicyConfig) -> anyhow::Result<()> {
    let now = Local::now().naive_local();
    let today = now.date();

    let crew = [
        ("Mina Haddad", "Operator", "Press", Some(110.0)),
        ("Tomas Vesely", "Electrician", "Maintenance", None),
    ];
    for (name, position, department, daily_salary) in crew {
        let worker = create_worker(
            store,
            CreateWorker {
                name: name.to_string(),
                position: position.to_string(),
                department: department.to_string(),
                daily_salary,
            },
            now,
        );
        let token = daily_token(store, policy, worker.id, today)?;
        println!(
            "badge for {}: {}",
            worker.name,
            serde_json::to_string(&token)?
        );
    }

    for (name, category) in [("Angle grinder", "Power tools"), ("Laser level", "Survey")] {
        let equipment = register_equipment(
            store,
            RegisterEquipment {
                name: name.to_string(),
                category: category.to_string(),
            },
        );
        println!(
            "label for {}: {}{}",
            equipment.name, policy.equipment_prefix, equipment.id
        );
    }

    println!("Scan a badge or label (exit to quit):");
    Ok(())
}

/// Loan or return decided by the tool's current state; `None` falls back to
/// a plain status report.
fn equipment_action(
    store: &mut InMemoryStore,
    equipment_id: u64,
    last_worker: Option<u64>,
    now: NaiveDateTime,
) -> Option<serde_json::Value> {
    let equipment = store.load_equipment(equipment_id)?;
    match equipment.status {
        EquipmentStatus::Loaned => Some(match return_equipment(store, equipment_id, now) {
            Ok(equipment) => json!({
                "code": "equipment-returned",
                "equipmentId": equipment.id,
                "message": format!("Returned {}", equipment.name),
            }),
            Err(e) => json!({ "code": "rejected", "message": e.to_string() }),
        }),
        EquipmentStatus::Available => {
            let worker_id = last_worker?;
            Some(match loan_equipment(store, equipment_id, worker_id, now) {
                Ok(equipment) => json!({
                    "code": "equipment-loaned",
                    "equipmentId": equipment.id,
                    "message": format!("Loaned {} to worker {worker_id}", equipment.name),
                }),
                Err(e) => json!({ "code": "rejected", "message": e.to_string() }),
            })
        }
        EquipmentStatus::Maintenance => None,
    }
}
