//! Overnight-reset saving estimate: which remote resets happened during the
//! unstaffed night hours, and how much production each one preserved.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::report::classify::StoppageClass;
use crate::report::{DateRange, EventRecord, round3};

/// Hour the night shift window opens on the previous day.
pub const NIGHT_START_HOUR: u32 = 19;
/// Hour the window closes on the window's own day.
pub const NIGHT_END_HOUR: u32 = 7;

/// One night of the requested range: `[day-1 19:00, day 07:00)`.
///
/// The start is inclusive and the end exclusive, so 19:00 the evening
/// before is inside the window and 07:00 on the day itself is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub day: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl NightWindow {
    /// Window covering the night leading into `day`, or `None` at the
    /// calendar boundary.
    pub fn leading_into(day: NaiveDate) -> Option<Self> {
        let start_time = NaiveTime::from_hms_opt(NIGHT_START_HOUR, 0, 0)?;
        let end_time = NaiveTime::from_hms_opt(NIGHT_END_HOUR, 0, 0)?;
        let previous = day.pred_opt()?;
        Some(Self {
            day,
            start: previous.and_time(start_time),
            end: day.and_time(end_time),
        })
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }
}

/// One window per calendar day of the range, in day order.
pub fn night_windows(range: &DateRange) -> Vec<NightWindow> {
    range.days().filter_map(NightWindow::leading_into).collect()
}

/// First window containing `t`, scanning in day order.
pub fn matching_night(windows: &[NightWindow], t: NaiveDateTime) -> Option<NightWindow> {
    windows.iter().copied().find(|w| w.contains(t))
}

/// A fault event reset remotely during one of the range's nights.
#[derive(Debug, Clone)]
pub struct OvernightCandidate<'a> {
    pub event: &'a EventRecord,
    pub window: NightWindow,
    pub finished: NaiveDateTime,
}

/// Selects the events the overnight panel reports on: fault-class, reset by
/// the remote operator, started inside a night window. Each event matches
/// at most one night. An event still open has not been reset yet and is
/// skipped.
pub fn overnight_candidates<'a>(
    events: &'a [EventRecord],
    windows: &[NightWindow],
) -> Vec<OvernightCandidate<'a>> {
    let mut candidates = Vec::new();
    for event in events {
        if event.class() != StoppageClass::Fault || !event.is_rcc_reset() {
            continue;
        }
        let Some(finished) = event.finished else {
            continue;
        };
        if let Some(window) = matching_night(windows, event.down_began) {
            candidates.push(OvernightCandidate {
                event,
                window,
                finished,
            });
        }
    }
    candidates
}

/// Hours of night remaining after the reset finished; a reset completed
/// after the window closed saves nothing.
pub fn saved_hours(window_end: NaiveDateTime, finished: NaiveDateTime) -> f64 {
    ((window_end - finished).num_seconds() as f64 / 3600.0).max(0.0)
}

/// Prorated share of the day's exported energy, rounded to 3 decimals.
/// No stats row for that day means no estimate, reported as 0.0.
pub fn prorated_energy(daily_energy_mwh: Option<f64>, saved_hours: f64) -> f64 {
    match daily_energy_mwh {
        Some(energy) => round3(energy / 24.0 * saved_hours),
        None => 0.0,
    }
}

/// One row of the overnight-resets panel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OvernightResetRow {
    pub windfarm: String,
    pub turbine: String,
    /// The day whose night window matched.
    pub night: NaiveDate,
    pub fault_code: Option<i32>,
    pub fault_description: Option<String>,
    pub down_began: NaiveDateTime,
    pub finished: NaiveDateTime,
    pub saved_hours: f64,
    pub saved_energy_mwh: f64,
}

/// Builds the panel row for one candidate, given that day's exported energy
/// for the candidate's windfarm.
pub fn overnight_row(
    candidate: &OvernightCandidate<'_>,
    daily_energy_mwh: Option<f64>,
) -> OvernightResetRow {
    let saved = saved_hours(candidate.window.end, candidate.finished);
    OvernightResetRow {
        windfarm: candidate.event.windfarm.clone(),
        turbine: candidate.event.turbine.clone(),
        night: candidate.window.day,
        fault_code: candidate.event.fault_code,
        fault_description: candidate.event.fault_description.clone(),
        down_began: candidate.event.down_began,
        finished: candidate.finished,
        saved_hours: saved,
        saved_energy_mwh: prorated_energy(daily_energy_mwh, saved),
    }
}
