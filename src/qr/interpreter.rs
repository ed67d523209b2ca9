//! Classification of raw scanner output into typed commands.
//!
//! The scanner collaborator hands over one decoded UTF-8 string per scan
//! with no guaranteed format. Classification is total: any input maps to
//! exactly one variant and nothing here panics or allocates surprises.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::config::PolicyConfig;
use crate::model::token::{ATTENDANCE_TOKEN_TYPE, DailyQRToken};
use crate::qr::token::{TokenValidity, validate_token};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanCommand {
    /// A daily attendance token, already checked against hash and expiry.
    Attendance {
        worker_id: u64,
        validity: TokenValidity,
    },
    /// An equipment label, `<prefix><digits>`.
    Equipment { equipment_id: u64 },
    /// Anything else; the raw text is passed back for manual entry.
    Unrecognized { raw: String },
}

/// Classify one decoded scan string. First match wins: attendance-token
/// JSON, then an equipment code, then unrecognized.
pub fn interpret(raw: &str, now: NaiveDateTime, policy: &PolicyConfig) -> ScanCommand {
    let text = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.get("type").and_then(Value::as_str) == Some(ATTENDANCE_TOKEN_TYPE) {
            // Declared as an attendance token; a payload missing fields is
            // junk, not an equipment code.
            return match serde_json::from_value::<DailyQRToken>(value) {
                Ok(token) => ScanCommand::Attendance {
                    worker_id: token.worker_id,
                    validity: validate_token(&token, now, &policy.token_secret),
                },
                Err(_) => ScanCommand::Unrecognized {
                    raw: raw.to_string(),
                },
            };
        }
    }

    if let Some(rest) = text.strip_prefix(&policy.equipment_prefix) {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(equipment_id) = rest.parse::<u64>() {
                return ScanCommand::Equipment { equipment_id };
            }
        }
    }

    ScanCommand::Unrecognized {
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::worker::{Worker, WorkerStatus};
    use crate::qr::token::generate_daily_token;
    use assert_matches::assert_matches;
    use chrono::NaiveDateTime;

    fn policy() -> PolicyConfig {
        PolicyConfig::default()
    }

    fn now() -> NaiveDateTime {
        "2026-08-03T08:30:00".parse().unwrap()
    }

    fn token_json() -> String {
        let worker = Worker {
            id: 3,
            name: "Ibrahim Khan".to_string(),
            position: "Electrician".to_string(),
            department: "Maintenance".to_string(),
            daily_salary: None,
            created_at: "2026-02-01T08:00:00".parse().unwrap(),
            status: WorkerStatus::Active,
        };
        let token =
            generate_daily_token(&worker, "2026-08-03".parse().unwrap(), &policy().token_secret);
        serde_json::to_string(&token).unwrap()
    }

    #[test]
    fn valid_token_classifies_as_attendance() {
        let cmd = interpret(&token_json(), now(), &policy());
        assert_matches!(
            cmd,
            ScanCommand::Attendance {
                worker_id: 3,
                validity: TokenValidity::Valid,
            }
        );
    }

    #[test]
    fn scanner_padding_is_tolerated() {
        let padded = format!("  {}\n", token_json());
        assert_matches!(
            interpret(&padded, now(), &policy()),
            ScanCommand::Attendance { .. }
        );
    }

    #[test]
    fn tampered_token_classifies_as_attendance_invalid() {
        let altered = token_json().replace("\"workerId\":3", "\"workerId\":4");
        assert_matches!(
            interpret(&altered, now(), &policy()),
            ScanCommand::Attendance {
                worker_id: 4,
                validity: TokenValidity::Tampered,
            }
        );
    }

    #[test]
    fn stale_token_classifies_as_attendance_expired() {
        let next_day = "2026-08-04T07:59:00".parse().unwrap();
        assert_matches!(
            interpret(&token_json(), next_day, &policy()),
            ScanCommand::Attendance {
                validity: TokenValidity::Expired,
                ..
            }
        );
    }

    #[test]
    fn attendance_json_missing_fields_is_unrecognized() {
        let cmd = interpret(r#"{"type":"attendance","workerId":3}"#, now(), &policy());
        assert_matches!(cmd, ScanCommand::Unrecognized { .. });
    }

    #[test]
    fn json_with_other_type_is_unrecognized() {
        let cmd = interpret(r#"{"type":"visitor","id":9}"#, now(), &policy());
        assert_matches!(cmd, ScanCommand::Unrecognized { .. });
    }

    #[test]
    fn equipment_code_classifies_with_parsed_id() {
        assert_eq!(
            interpret("EQ-42", now(), &policy()),
            ScanCommand::Equipment { equipment_id: 42 }
        );
    }

    #[test]
    fn equipment_prefix_alone_is_unrecognized() {
        assert_matches!(
            interpret("EQ-", now(), &policy()),
            ScanCommand::Unrecognized { .. }
        );
    }

    #[test]
    fn equipment_code_with_letters_is_unrecognized() {
        assert_matches!(
            interpret("EQ-12x", now(), &policy()),
            ScanCommand::Unrecognized { .. }
        );
    }

    #[test]
    fn equipment_code_overflowing_u64_is_unrecognized() {
        assert_matches!(
            interpret("EQ-99999999999999999999999", now(), &policy()),
            ScanCommand::Unrecognized { .. }
        );
    }

    #[test]
    fn malformed_json_is_unrecognized_with_raw_passthrough() {
        let cmd = interpret("{not json", now(), &policy());
        assert_eq!(
            cmd,
            ScanCommand::Unrecognized {
                raw: "{not json".to_string()
            }
        );
    }

    #[test]
    fn empty_string_is_unrecognized() {
        assert_matches!(
            interpret("", now(), &policy()),
            ScanCommand::Unrecognized { .. }
        );
    }

    #[test]
    fn free_text_is_unrecognized() {
        assert_matches!(
            interpret("hello toolroom", now(), &policy()),
            ScanCommand::Unrecognized { .. }
        );
    }
}
