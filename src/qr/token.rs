//! Daily attendance token generation and validation.
//!
//! Tokens are never stored; validation recomputes the integrity hash from
//! the fields the hash covers, so a token survives any round-trip through
//! JSON but fails the moment `workerId` or `date` is altered.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use strum_macros::Display;

use crate::model::token::{ATTENDANCE_TOKEN_TYPE, DailyQRToken};
use crate::model::worker::Worker;

type HmacSha256 = Hmac<Sha256>;

/// Keyed HMAC-SHA256 hex digest binding a worker id to an issue date.
pub fn token_hash(worker_id: u64, issue_date: NaiveDate, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{worker_id}:{issue_date}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Midnight boundary following `date`; tokens issued on `date` expire here.
pub fn midnight_after(date: NaiveDate) -> NaiveDateTime {
    date.checked_add_days(Days::new(1))
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Build the token a worker's QR code carries for `today`.
///
/// Pure and deterministic: identical inputs produce byte-identical tokens.
pub fn generate_daily_token(worker: &Worker, today: NaiveDate, secret: &str) -> DailyQRToken {
    DailyQRToken {
        kind: ATTENDANCE_TOKEN_TYPE.to_string(),
        worker_id: worker.id,
        name: worker.name.clone(),
        date: today,
        expires_at: midnight_after(today),
        hash: token_hash(worker.id, today, secret),
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenValidity {
    Valid,
    Tampered,
    Expired,
}

impl TokenValidity {
    pub fn is_valid(self) -> bool {
        self == TokenValidity::Valid
    }
}

/// Check a presented token against a recomputed hash and expiry.
///
/// The expiry is recomputed from the issue date rather than read from the
/// presented `expiresAt`, which the hash does not cover.
pub fn validate_token(token: &DailyQRToken, now: NaiveDateTime, secret: &str) -> TokenValidity {
    if token.hash != token_hash(token.worker_id, token.date, secret) {
        return TokenValidity::Tampered;
    }
    if now >= midnight_after(token.date) {
        return TokenValidity::Expired;
    }
    TokenValidity::Valid
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    const SECRET: &str = "test-secret";

    fn worker() -> Worker {
        Worker {
            id: 7,
            name: "Rosa Diaz".to_string(),
            position: "Welder".to_string(),
            department: "Fabrication".to_string(),
            daily_salary: Some(100.0),
            created_at: datetime("2026-01-05T09:00:00"),
            status: crate::model::worker::WorkerStatus::Active,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    // -- Hash --------------------------------------------------------------

    #[test]
    fn hash_is_deterministic() {
        let a = token_hash(7, date("2026-08-03"), SECRET);
        let b = token_hash(7, date("2026-08-03"), SECRET);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_is_sha256_hex() {
        let h = token_hash(7, date("2026-08-03"), SECRET);
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_differs_across_dates() {
        let a = token_hash(7, date("2026-08-03"), SECRET);
        let b = token_hash(7, date("2026-08-04"), SECRET);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_differs_across_workers() {
        let a = token_hash(7, date("2026-08-03"), SECRET);
        let b = token_hash(8, date("2026-08-03"), SECRET);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_differs_across_secrets() {
        let a = token_hash(7, date("2026-08-03"), SECRET);
        let b = token_hash(7, date("2026-08-03"), "other-secret");
        assert_ne!(a, b);
    }

    // -- Generation --------------------------------------------------------

    #[test]
    fn generation_is_deterministic() {
        let a = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        let b = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn token_expires_at_following_midnight() {
        let token = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        assert_eq!(token.expires_at, datetime("2026-08-04T00:00:00"));
    }

    #[test]
    fn token_serializes_with_camel_case_fields() {
        let token = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["type"], "attendance");
        assert_eq!(json["workerId"], 7);
        assert_eq!(json["date"], "2026-08-03");
        assert!(json["expiresAt"].is_string());
        assert!(json["hash"].is_string());
    }

    // -- Validation --------------------------------------------------------

    #[test]
    fn fresh_token_is_valid_before_expiry() {
        let token = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        let validity = validate_token(&token, datetime("2026-08-03T23:59:59"), SECRET);
        assert_eq!(validity, TokenValidity::Valid);
        assert!(validity.is_valid());
    }

    #[test]
    fn token_is_expired_exactly_at_midnight() {
        let token = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        assert_eq!(
            validate_token(&token, datetime("2026-08-04T00:00:00"), SECRET),
            TokenValidity::Expired
        );
    }

    #[test]
    fn token_is_expired_after_midnight() {
        let token = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        assert_eq!(
            validate_token(&token, datetime("2026-08-05T10:00:00"), SECRET),
            TokenValidity::Expired
        );
    }

    #[test]
    fn tampered_worker_id_is_rejected() {
        let mut token = generate_daily_token(&worker(), date("2026-08-03"), SECRET);
        token.worker_id = 8;
        assert_eq!(
            validate_token(&token, datetime("2026-08-03T10:00:00"), SECRET),
            TokenValidity::Tampered
        );
    }

    #[test]
    fn tampered_date_is_rejected_before_expiry_check() {
        // Re-dating an expired token to today must read as tampering, not
        // as a fresh token.
        let mut token = generate_daily_token(&worker(), date("2026-08-01"), SECRET);
        token.date = date("2026-08-03");
        assert_eq!(
            validate_token(&token, datetime("2026-08-03T10:00:00"), SECRET),
            TokenValidity::Tampered
        );
    }

    #[test]
    fn forged_expiry_does_not_extend_a_token() {
        let mut token = generate_daily_token(&worker(), date("2026-08-01"), SECRET);
        token.expires_at = datetime("2026-09-01T00:00:00");
        assert_eq!(
            validate_token(&token, datetime("2026-08-03T10:00:00"), SECRET),
            TokenValidity::Expired
        );
    }

    #[test]
    fn token_from_other_secret_is_tampered() {
        let token = generate_daily_token(&worker(), date("2026-08-03"), "other-secret");
        assert_eq!(
            validate_token(&token, datetime("2026-08-03T10:00:00"), SECRET),
            TokenValidity::Tampered
        );
    }
}
