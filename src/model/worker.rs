use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: u64,
    pub name: String,
    pub position: String,
    pub department: String,
    /// Daily salary in currency units; falls back to the configured default
    /// when unset.
    pub daily_salary: Option<f64>,
    pub created_at: NaiveDateTime,
    pub status: WorkerStatus,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WorkerStatus {
    Active,
    Inactive,
}
