//! Repository seam between the core and whatever owns durability.
//!
//! Services load and save whole records by key and never touch I/O, so a
//! database-backed store can replace [`InMemoryStore`] without changing any
//! service code.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::model::attendance::DailyAttendanceRecord;
use crate::model::equipment::Equipment;
use crate::model::worker::Worker;

pub trait WorkerStore {
    fn load_worker(&self, id: u64) -> Option<Worker>;
    fn save_worker(&mut self, worker: Worker);
    fn next_worker_id(&mut self) -> u64;
    fn list_workers(&self) -> Vec<Worker>;
}

pub trait AttendanceStore {
    fn load_record(&self, worker_id: u64, date: NaiveDate) -> Option<DailyAttendanceRecord>;
    fn save_record(&mut self, record: DailyAttendanceRecord);
    /// Records for one worker with `from <= date <= to`, ordered by date.
    fn records_between(
        &self,
        worker_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<DailyAttendanceRecord>;
}

pub trait EquipmentStore {
    fn load_equipment(&self, id: u64) -> Option<Equipment>;
    fn save_equipment(&mut self, equipment: Equipment);
    fn next_equipment_id(&mut self) -> u64;
    fn list_equipment(&self) -> Vec<Equipment>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    workers: HashMap<u64, Worker>,
    attendance: BTreeMap<(u64, NaiveDate), DailyAttendanceRecord>,
    equipment: HashMap<u64, Equipment>,
    last_worker_id: u64,
    last_equipment_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkerStore for InMemoryStore {
    fn load_worker(&self, id: u64) -> Option<Worker> {
        self.workers.get(&id).cloned()
    }

    fn save_worker(&mut self, worker: Worker) {
        self.workers.insert(worker.id, worker);
    }

    fn next_worker_id(&mut self) -> u64 {
        self.last_worker_id += 1;
        self.last_worker_id
    }

    fn list_workers(&self) -> Vec<Worker> {
        let mut workers: Vec<Worker> = self.workers.values().cloned().collect();
        workers.sort_by_key(|w| w.id);
        workers
    }
}

impl AttendanceStore for InMemoryStore {
    fn load_record(&self, worker_id: u64, date: NaiveDate) -> Option<DailyAttendanceRecord> {
        self.attendance.get(&(worker_id, date)).cloned()
    }

    fn save_record(&mut self, record: DailyAttendanceRecord) {
        self.attendance
            .insert((record.worker_id, record.date), record);
    }

    fn records_between(
        &self,
        worker_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<DailyAttendanceRecord> {
        self.attendance
            .range((worker_id, from)..=(worker_id, to))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

impl EquipmentStore for InMemoryStore {
    fn load_equipment(&self, id: u64) -> Option<Equipment> {
        self.equipment.get(&id).cloned()
    }

    fn save_equipment(&mut self, equipment: Equipment) {
        self.equipment.insert(equipment.id, equipment);
    }

    fn next_equipment_id(&mut self) -> u64 {
        self.last_equipment_id += 1;
        self.last_equipment_id
    }

    fn list_equipment(&self) -> Vec<Equipment> {
        let mut items: Vec<Equipment> = self.equipment.values().cloned().collect();
        items.sort_by_key(|e| e.id);
        items
    }
}
