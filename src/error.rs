use chrono::NaiveTime;
use thiserror::Error;

use crate::model::equipment::EquipmentStatus;

pub type Result<T> = std::result::Result<T, Error>;

/// Core failures, returned as data so callers decide how to surface them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("worker {0} not found")]
    WorkerNotFound(u64),

    #[error("equipment {0} not found")]
    EquipmentNotFound(u64),

    #[error("equipment {id} is {status}, not available")]
    EquipmentUnavailable { id: u64, status: EquipmentStatus },

    #[error("equipment {0} is not on loan")]
    EquipmentNotOnLoan(u64),

    #[error("check-out at {attempted} is not after check-in at {check_in}")]
    CheckOutBeforeCheckIn {
        check_in: NaiveTime,
        attempted: NaiveTime,
    },
}
