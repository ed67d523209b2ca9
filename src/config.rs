use chrono::{NaiveTime, Weekday};
use dotenvy::dotenv;
use std::env;

/// Business-policy knobs. Every value here is policy, not algorithm, so all
/// of them are overridable from the environment.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Secret key for the daily token hash.
    pub token_secret: String,
    /// Work-day start; arrival at or before this time counts as early.
    pub day_start: NaiveTime,
    /// Minutes after `day_start` still classified as on-time instead of
    /// late. Zero disables the window.
    pub grace_minutes: u32,
    /// Hours in a standard work day; anything beyond is overtime.
    pub standard_hours: f64,
    /// Overtime surcharge factor on the hourly rate.
    pub overtime_surcharge: f64,
    /// Extra factor applied on top of the surcharge on the weekend day.
    pub weekend_multiplier: f64,
    pub weekend_day: Weekday,
    /// First day of the reporting week.
    pub week_start: Weekday,
    /// Daily salary assumed for workers without a salary record.
    pub default_daily_salary: f64,
    /// Check-in time backfilled when the first event of a day is a
    /// check-out.
    pub missing_check_in_default: NaiveTime,
    /// Prefix of equipment QR codes, followed by the numeric id.
    pub equipment_prefix: String,
}

impl PolicyConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            token_secret: env::var("QR_TOKEN_SECRET").expect("QR_TOKEN_SECRET must be set"),
            day_start: parse_time(
                &env::var("WORK_DAY_START").unwrap_or_else(|_| "08:00".to_string()),
                "WORK_DAY_START",
            ),
            grace_minutes: env::var("GRACE_MINUTES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .expect("GRACE_MINUTES must be a number"),
            standard_hours: env::var("STANDARD_HOURS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .expect("STANDARD_HOURS must be a number"),
            overtime_surcharge: env::var("OVERTIME_SURCHARGE")
                .unwrap_or_else(|_| "1.25".to_string())
                .parse()
                .expect("OVERTIME_SURCHARGE must be a number"),
            weekend_multiplier: env::var("WEEKEND_MULTIPLIER")
                .unwrap_or_else(|_| "1.5".to_string())
                .parse()
                .expect("WEEKEND_MULTIPLIER must be a number"),
            weekend_day: env::var("WEEKEND_DAY")
                .unwrap_or_else(|_| "sat".to_string())
                .parse()
                .expect("WEEKEND_DAY must be a weekday name"),
            week_start: env::var("WEEK_START_DAY")
                .unwrap_or_else(|_| "thu".to_string())
                .parse()
                .expect("WEEK_START_DAY must be a weekday name"),
            default_daily_salary: env::var("DEFAULT_DAILY_SALARY")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("DEFAULT_DAILY_SALARY must be a number"),
            missing_check_in_default: parse_time(
                &env::var("MISSING_CHECK_IN_DEFAULT").unwrap_or_else(|_| "17:00".to_string()),
                "MISSING_CHECK_IN_DEFAULT",
            ),
            equipment_prefix: env::var("EQUIPMENT_PREFIX").unwrap_or_else(|_| "EQ-".to_string()),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            token_secret: "toolroom-dev-secret".to_string(),
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            grace_minutes: 0,
            standard_hours: 8.0,
            overtime_surcharge: 1.25,
            weekend_multiplier: 1.5,
            weekend_day: Weekday::Sat,
            week_start: Weekday::Thu,
            default_daily_salary: 100.0,
            missing_check_in_default: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            equipment_prefix: "EQ-".to_string(),
        }
    }
}

fn parse_time(value: &str, var: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M")
        .unwrap_or_else(|_| panic!("{var} must be HH:MM, got {value:?}"))
}
