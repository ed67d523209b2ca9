use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// `type` field value that marks a payload as an attendance token.
pub const ATTENDANCE_TOKEN_TYPE: &str = "attendance";

/// Daily attendance token carried inside a worker's QR code.
///
/// Derived on demand and never stored; validation recomputes the hash from
/// `worker_id` and `date`. Two tokens generated for the same worker on the
/// same date are byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQRToken {
    #[serde(rename = "type")]
    pub kind: String,
    pub worker_id: u64,
    pub name: String,
    /// Issue date; the token is only valid on this calendar day.
    pub date: NaiveDate,
    pub expires_at: NaiveDateTime,
    pub hash: String,
}
