use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub status: EquipmentStatus,
    /// Worker currently holding the item, set while `status` is `Loaned`.
    pub holder: Option<u64>,
    pub loans: Vec<LoanEvent>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EquipmentStatus {
    Available,
    Loaned,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEvent {
    pub id: String,
    pub worker_id: u64,
    pub action: LoanAction,
    pub at: NaiveDateTime,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LoanAction {
    Loaned,
    Returned,
}
