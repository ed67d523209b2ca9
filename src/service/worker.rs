//! Worker registry.
//!
//! Workers are never hard-deleted: deactivation flips the status flag so
//! the attendance ledger keeps its history.

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::worker::{Worker, WorkerStatus};
use crate::store::WorkerStore;

#[derive(Debug, Deserialize)]
pub struct CreateWorker {
    pub name: String,
    pub position: String,
    pub department: String,
    pub daily_salary: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorker {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub daily_salary: Option<f64>,
    pub status: Option<WorkerStatus>,
}

pub fn create_worker<S: WorkerStore>(
    store: &mut S,
    payload: CreateWorker,
    at: NaiveDateTime,
) -> Worker {
    let worker = Worker {
        id: store.next_worker_id(),
        name: payload.name,
        position: payload.position,
        department: payload.department,
        daily_salary: payload.daily_salary,
        created_at: at,
        status: WorkerStatus::Active,
    };
    store.save_worker(worker.clone());
    info!(worker_id = worker.id, name = %worker.name, "worker created");
    worker
}

pub fn get_worker<S: WorkerStore>(store: &S, id: u64) -> Result<Worker> {
    store.load_worker(id).ok_or(Error::WorkerNotFound(id))
}

pub fn list_workers<S: WorkerStore>(store: &S) -> Vec<Worker> {
    store.list_workers()
}

/// Partial update; absent fields keep their current value.
pub fn update_worker<S: WorkerStore>(
    store: &mut S,
    id: u64,
    payload: UpdateWorker,
) -> Result<Worker> {
    let current = store.load_worker(id).ok_or(Error::WorkerNotFound(id))?;

    let worker = Worker {
        id,
        name: payload.name.unwrap_or(current.name),
        position: payload.position.unwrap_or(current.position),
        department: payload.department.unwrap_or(current.department),
        daily_salary: payload.daily_salary.or(current.daily_salary),
        created_at: current.created_at,
        status: payload.status.unwrap_or(current.status),
    };
    store.save_worker(worker.clone());
    info!(worker_id = id, "worker updated");
    Ok(worker)
}

pub fn deactivate_worker<S: WorkerStore>(store: &mut S, id: u64) -> Result<Worker> {
    let mut worker = store.load_worker(id).ok_or(Error::WorkerNotFound(id))?;
    worker.status = WorkerStatus::Inactive;
    store.save_worker(worker.clone());
    info!(worker_id = id, "worker deactivated");
    Ok(worker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn at() -> NaiveDateTime {
        "2026-08-03T09:00:00".parse().unwrap()
    }

    fn create(store: &mut InMemoryStore, name: &str) -> Worker {
        create_worker(
            store,
            CreateWorker {
                name: name.to_string(),
                position: "Operator".to_string(),
                department: "Press".to_string(),
                daily_salary: Some(120.0),
            },
            at(),
        )
    }

    #[test]
    fn created_workers_get_sequential_ids_and_active_status() {
        let mut store = InMemoryStore::new();
        let a = create(&mut store, "Mina");
        let b = create(&mut store, "Tomas");

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, WorkerStatus::Active);
        assert_eq!(list_workers(&store).len(), 2);
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let mut store = InMemoryStore::new();
        let worker = create(&mut store, "Mina");

        let updated = update_worker(
            &mut store,
            worker.id,
            UpdateWorker {
                position: Some("Supervisor".to_string()),
                ..UpdateWorker::default()
            },
        )
        .unwrap();

        assert_eq!(updated.position, "Supervisor");
        assert_eq!(updated.name, "Mina");
        assert_eq!(updated.daily_salary, Some(120.0));
        assert_eq!(updated.created_at, worker.created_at);
    }

    #[test]
    fn deactivation_is_a_soft_flag() {
        let mut store = InMemoryStore::new();
        let worker = create(&mut store, "Mina");

        let deactivated = deactivate_worker(&mut store, worker.id).unwrap();
        assert_eq!(deactivated.status, WorkerStatus::Inactive);
        // Still loadable; the ledger keeps its history.
        assert!(get_worker(&store, worker.id).is_ok());
    }

    #[test]
    fn missing_ids_are_reported_not_fabricated() {
        let mut store = InMemoryStore::new();
        assert_eq!(get_worker(&store, 5).unwrap_err(), Error::WorkerNotFound(5));
        assert_eq!(
            update_worker(&mut store, 5, UpdateWorker::default()).unwrap_err(),
            Error::WorkerNotFound(5)
        );
        assert_eq!(
            deactivate_worker(&mut store, 5).unwrap_err(),
            Error::WorkerNotFound(5)
        );
    }
}
