//! Report builders: pure aggregation over rows fetched by the gateways.
//!
//! Every function in this tree takes already-fetched rows and returns the
//! dashboard's summary shapes. Nothing here touches a database, which is
//! what makes the aggregation rules testable without one.

pub mod analysis;
pub mod classify;
pub mod idf;
pub mod overnight;
pub mod summary;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::FromQueryResult;

use crate::error::{AppError, AppResult};
use crate::report::classify::StoppageClass;

/// Period labels attached to rows of two-period comparison reports.
pub const PERIOD_ONE: &str = "period 1";
pub const PERIOD_TWO: &str = "period 2";

/// Reset-agent name identifying resets performed by the remote operator.
pub const RESET_AGENT_RCC: &str = "RCC";

/// An inclusive date range as supplied by the dashboard.
///
/// `start`/`end` are the timestamp bounds used in SQL filters: the whole of
/// the end day is included by setting `end` to `enddate + 1 day - 1 second`,
/// so an event at exactly `enddate 23:59:59` is in range and one at
/// `enddate+1 00:00:00` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Parse `YYYY-MM-DD` query parameters into a range.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for malformed dates or an end date
    /// before the start date.
    pub fn parse(startdate: &str, enddate: &str) -> AppResult<Self> {
        let first_day = parse_day(startdate, "startdate")?;
        let last_day = parse_day(enddate, "enddate")?;

        if last_day < first_day {
            return Err(AppError::BadRequest(
                "enddate must not precede startdate".to_string(),
            ));
        }

        let next_day = last_day
            .succ_opt()
            .ok_or_else(|| AppError::BadRequest("enddate out of range".to_string()))?;

        Ok(Self {
            first_day,
            last_day,
            start: first_day.and_time(NaiveTime::MIN),
            end: next_day.and_time(NaiveTime::MIN) - Duration::seconds(1),
        })
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    /// Calendar days of the range, first to last.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day.iter_days().take_while(|d| *d <= self.last_day)
    }
}

fn parse_day(value: &str, param: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("invalid {param} '{value}', expected YYYY-MM-DD"))
    })
}

/// One downtime event joined with its reference names, as consumed by every
/// report builder. Produced by `gateway::ops`.
#[derive(Debug, Clone, FromQueryResult)]
pub struct EventRecord {
    pub id: i32,
    /// Wind-farm abbreviation, the grouping key throughout.
    pub windfarm: String,
    pub turbine: String,
    pub rationale: String,
    pub reason: Option<String>,
    /// Manufacturer fault code and its description, when recorded.
    pub fault_code: Option<i32>,
    pub fault_description: Option<String>,
    pub stop_code_id: Option<i32>,
    pub reset_agent: Option<String>,
    pub reset_type: Option<String>,
    pub down_began: NaiveDateTime,
    pub maintenance_began: Option<NaiveDateTime>,
    pub finished: Option<NaiveDateTime>,
    pub note: Option<String>,
}

impl EventRecord {
    pub fn class(&self) -> StoppageClass {
        StoppageClass::from_rationale(&self.rationale)
    }

    /// Hours from down-begin to finish, or to `now` while still open.
    pub fn downtime_hours(&self, now: NaiveDateTime) -> f64 {
        hours_between(self.down_began, self.finished.unwrap_or(now))
    }

    /// Hours from down-begin to finish; `None` while the event is open.
    pub fn completed_downtime_hours(&self) -> Option<f64> {
        self.finished.map(|f| hours_between(self.down_began, f))
    }

    /// Hours from maintenance-start to finish; `None` when either anchor is
    /// missing.
    pub fn maintenance_hours(&self) -> Option<f64> {
        match (self.maintenance_began, self.finished) {
            (Some(began), Some(finished)) => Some(hours_between(began, finished)),
            _ => None,
        }
    }

    pub fn is_rcc_reset(&self) -> bool {
        self.reset_agent.as_deref() == Some(RESET_AGENT_RCC)
    }
}

/// One per-facility per-day row from the production statistics store.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductionDay {
    pub windfarm: String,
    pub stat_date: NaiveDate,
    pub avg_wind_speed: Option<f64>,
    pub energy_export: Option<f64>,
}

/// Elapsed hours between two timestamps.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// Arithmetic mean, defined as 0.0 for an empty set. Every average the
/// dashboard shows goes through here so no endpoint can divide by zero.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to 3 decimal places (energy figures).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
