//! IDF stop-code partitioning and the remote-reset callout saving.

use serde::Serialize;
use utoipa::ToSchema;

use crate::report::{EventRecord, mean};

/// Stop-code row id for a turbine that failed to restart after an IDF stop.
pub const IDF_RESTART_STOP_CODE: i32 = 102;
/// Stop-code row id for a turbine that failed to come out of curtailment.
pub const IDF_CURTAILMENT_STOP_CODE: i32 = 110;

/// Manufacturer codes the dashboard displays for the two buckets.
pub const IDF_RESTART_DISPLAY_CODE: i32 = 434;
pub const IDF_CURTAILMENT_DISPLAY_CODE: i32 = 442;

pub const IDF_RESTART_LABEL: &str = "restart failure";
pub const IDF_CURTAILMENT_LABEL: &str = "curtailment failure";

/// Hours a site callout is budgeted at; a remote reset saves whatever part
/// of that the downtime did not consume.
pub const CALLOUT_HOURS: f64 = 2.0;

/// Callout hours avoided by resolving the event in `downtime_hours`,
/// floored at zero once downtime exceeds the callout budget.
pub fn callout_time_saved(downtime_hours: f64) -> f64 {
    (CALLOUT_HOURS - downtime_hours).max(0.0)
}

/// One of the two fixed IDF buckets.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdfHeading {
    /// Manufacturer code shown on the dashboard (434 or 442).
    pub code: i32,
    pub kind: String,
    pub count: i64,
    pub avg_downtime_hours: f64,
    /// Callout hours avoided, summed over RCC resets only.
    pub time_saved_hours: f64,
}

/// Partitions events carrying one of the two IDF stop codes into the
/// restart and curtailment buckets. Both buckets are always present, in
/// that order, so the panel layout never shifts.
pub fn idf_headings(events: &[EventRecord]) -> Vec<IdfHeading> {
    struct Bucket {
        count: i64,
        downtime: Vec<f64>,
        saved: f64,
    }

    let mut restart = Bucket {
        count: 0,
        downtime: Vec::new(),
        saved: 0.0,
    };
    let mut curtailment = Bucket {
        count: 0,
        downtime: Vec::new(),
        saved: 0.0,
    };

    for event in events {
        let bucket = match event.stop_code_id {
            Some(IDF_RESTART_STOP_CODE) => &mut restart,
            Some(IDF_CURTAILMENT_STOP_CODE) => &mut curtailment,
            _ => continue,
        };
        bucket.count += 1;
        if let Some(hours) = event.completed_downtime_hours() {
            bucket.downtime.push(hours);
            if event.is_rcc_reset() {
                bucket.saved += callout_time_saved(hours);
            }
        }
    }

    vec![
        IdfHeading {
            code: IDF_RESTART_DISPLAY_CODE,
            kind: IDF_RESTART_LABEL.to_string(),
            count: restart.count,
            avg_downtime_hours: mean(&restart.downtime),
            time_saved_hours: restart.saved,
        },
        IdfHeading {
            code: IDF_CURTAILMENT_DISPLAY_CODE,
            kind: IDF_CURTAILMENT_LABEL.to_string(),
            count: curtailment.count,
            avg_downtime_hours: mean(&curtailment.downtime),
            time_saved_hours: curtailment.saved,
        },
    ]
}
