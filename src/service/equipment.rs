//! Equipment registry and loan tracking.
//!
//! Every loan and return appends to the item's history; the holder field is
//! a weak reference to the worker id, not ownership.

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::equipment::{Equipment, EquipmentStatus, LoanAction, LoanEvent};
use crate::store::{EquipmentStore, WorkerStore};

#[derive(Debug, Deserialize)]
pub struct RegisterEquipment {
    pub name: String,
    pub category: String,
}

pub fn register_equipment<S: EquipmentStore>(
    store: &mut S,
    payload: RegisterEquipment,
) -> Equipment {
    let equipment = Equipment {
        id: store.next_equipment_id(),
        name: payload.name,
        category: payload.category,
        status: EquipmentStatus::Available,
        holder: None,
        loans: Vec::new(),
    };
    store.save_equipment(equipment.clone());
    info!(equipment_id = equipment.id, name = %equipment.name, "equipment registered");
    equipment
}

pub fn get_equipment<S: EquipmentStore>(store: &S, id: u64) -> Result<Equipment> {
    store.load_equipment(id).ok_or(Error::EquipmentNotFound(id))
}

pub fn list_equipment<S: EquipmentStore>(store: &S) -> Vec<Equipment> {
    store.list_equipment()
}

/// Hand an available item to a worker.
pub fn loan_equipment<S>(
    store: &mut S,
    equipment_id: u64,
    worker_id: u64,
    at: NaiveDateTime,
) -> Result<Equipment>
where
    S: EquipmentStore + WorkerStore,
{
    if store.load_worker(worker_id).is_none() {
        return Err(Error::WorkerNotFound(worker_id));
    }
    let mut equipment = get_equipment(store, equipment_id)?;
    if equipment.status != EquipmentStatus::Available {
        return Err(Error::EquipmentUnavailable {
            id: equipment_id,
            status: equipment.status,
        });
    }

    equipment.status = EquipmentStatus::Loaned;
    equipment.holder = Some(worker_id);
    equipment.loans.push(LoanEvent {
        id: Uuid::new_v4().to_string(),
        worker_id,
        action: LoanAction::Loaned,
        at,
    });
    store.save_equipment(equipment.clone());
    info!(equipment_id, worker_id, "equipment loaned");
    Ok(equipment)
}

/// Take a loaned item back; the returning worker is the current holder.
pub fn return_equipment<S: EquipmentStore>(
    store: &mut S,
    equipment_id: u64,
    at: NaiveDateTime,
) -> Result<Equipment> {
    let mut equipment = get_equipment(store, equipment_id)?;
    let holder = match (equipment.status, equipment.holder) {
        (EquipmentStatus::Loaned, Some(holder)) => holder,
        _ => return Err(Error::EquipmentNotOnLoan(equipment_id)),
    };

    equipment.status = EquipmentStatus::Available;
    equipment.holder = None;
    equipment.loans.push(LoanEvent {
        id: Uuid::new_v4().to_string(),
        worker_id: holder,
        action: LoanAction::Returned,
        at,
    });
    store.save_equipment(equipment.clone());
    info!(equipment_id, worker_id = holder, "equipment returned");
    Ok(equipment)
}

/// Pull a non-loaned item out of circulation.
pub fn set_maintenance<S: EquipmentStore>(store: &mut S, equipment_id: u64) -> Result<Equipment> {
    let mut equipment = get_equipment(store, equipment_id)?;
    if equipment.status == EquipmentStatus::Loaned {
        return Err(Error::EquipmentUnavailable {
            id: equipment_id,
            status: equipment.status,
        });
    }
    equipment.status = EquipmentStatus::Maintenance;
    store.save_equipment(equipment.clone());
    info!(equipment_id, "equipment sent to maintenance");
    Ok(equipment)
}

pub fn return_to_service<S: EquipmentStore>(store: &mut S, equipment_id: u64) -> Result<Equipment> {
    let mut equipment = get_equipment(store, equipment_id)?;
    if equipment.status == EquipmentStatus::Loaned {
        return Err(Error::EquipmentUnavailable {
            id: equipment_id,
            status: equipment.status,
        });
    }
    equipment.status = EquipmentStatus::Available;
    store.save_equipment(equipment.clone());
    info!(equipment_id, "equipment back in service");
    Ok(equipment)
}
