use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::report::classify::StoppageClass;
use crate::report::{EventRecord, mean};

/// Reason label used when an event has no reason recorded.
pub const REASON_NOT_RECORDED: &str = "(not recorded)";

/// Headline figures for a date range: one count per class plus the two
/// average-duration anchors.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoppageHeadings {
    pub total: i64,
    pub scheduled: i64,
    pub non_scheduled: i64,
    pub faults: i64,
    /// Mean hours from down-begin to finish, over completed events.
    pub avg_downtime_hours: f64,
    /// Mean hours from maintenance-start to finish, over events carrying both.
    pub avg_maintenance_hours: f64,
}

pub fn stoppage_headings(events: &[EventRecord]) -> StoppageHeadings {
    let mut scheduled = 0_i64;
    let mut non_scheduled = 0_i64;
    let mut faults = 0_i64;

    for event in events {
        match event.class() {
            StoppageClass::Scheduled => scheduled += 1,
            StoppageClass::NonScheduled => non_scheduled += 1,
            StoppageClass::Fault => faults += 1,
        }
    }

    let downtime: Vec<f64> = events
        .iter()
        .filter_map(EventRecord::completed_downtime_hours)
        .collect();
    let maintenance: Vec<f64> = events
        .iter()
        .filter_map(EventRecord::maintenance_hours)
        .collect();

    StoppageHeadings {
        total: events.len() as i64,
        scheduled,
        non_scheduled,
        faults,
        avg_downtime_hours: mean(&downtime),
        avg_maintenance_hours: mean(&maintenance),
    }
}

/// Count and average durations for one class (the services and faults
/// detail panels).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassBreakdown {
    pub count: i64,
    pub avg_downtime_hours: f64,
    pub avg_maintenance_hours: f64,
}

pub fn class_breakdown(events: &[EventRecord], class: StoppageClass) -> ClassBreakdown {
    let selected: Vec<&EventRecord> = events.iter().filter(|e| e.class() == class).collect();

    let downtime: Vec<f64> = selected
        .iter()
        .filter_map(|e| e.completed_downtime_hours())
        .collect();
    let maintenance: Vec<f64> = selected
        .iter()
        .filter_map(|e| e.maintenance_hours())
        .collect();

    ClassBreakdown {
        count: selected.len() as i64,
        avg_downtime_hours: mean(&downtime),
        avg_maintenance_hours: mean(&maintenance),
    }
}

/// One `{windfarm, kind, count}` triple of the per-farm breakdown.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SiteStoppages {
    pub windfarm: String,
    pub kind: String,
    pub count: i64,
}

/// Per-farm mean downtime and service hours, parallel to the triples.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SiteAverages {
    pub windfarm: String,
    pub avg_downtime_hours: f64,
    pub avg_service_hours: f64,
}

/// Per-windfarm breakdown: class counts plus mean downtime hours over all
/// completed events and mean service hours over scheduled ones. Farms appear
/// in first-seen order; only non-empty class buckets are emitted.
pub fn summary_by_windfarm(events: &[EventRecord]) -> (Vec<SiteStoppages>, Vec<SiteAverages>) {
    struct Accum {
        windfarm: String,
        counts: [i64; 3],
        downtime: Vec<f64>,
        service: Vec<f64>,
    }

    // Linear scan preserves first-seen farm order.
    let mut farms: Vec<Accum> = Vec::new();

    for event in events {
        let idx = match farms.iter().position(|f| f.windfarm == event.windfarm) {
            Some(i) => i,
            None => {
                farms.push(Accum {
                    windfarm: event.windfarm.clone(),
                    counts: [0; 3],
                    downtime: Vec::new(),
                    service: Vec::new(),
                });
                farms.len() - 1
            }
        };
        let slot = &mut farms[idx];

        let class = event.class();
        slot.counts[class_index(class)] += 1;

        if let Some(hours) = event.completed_downtime_hours() {
            slot.downtime.push(hours);
        }
        if class == StoppageClass::Scheduled {
            if let Some(hours) = event.maintenance_hours() {
                slot.service.push(hours);
            }
        }
    }

    let mut stoppages = Vec::new();
    let mut averages = Vec::new();

    for farm in farms {
        for class in [
            StoppageClass::Scheduled,
            StoppageClass::NonScheduled,
            StoppageClass::Fault,
        ] {
            let count = farm.counts[class_index(class)];
            if count > 0 {
                stoppages.push(SiteStoppages {
                    windfarm: farm.windfarm.clone(),
                    kind: class.label().to_string(),
                    count,
                });
            }
        }
        averages.push(SiteAverages {
            windfarm: farm.windfarm,
            avg_downtime_hours: mean(&farm.downtime),
            avg_service_hours: mean(&farm.service),
        });
    }

    (stoppages, averages)
}

fn class_index(class: StoppageClass) -> usize {
    match class {
        StoppageClass::Scheduled => 0,
        StoppageClass::NonScheduled => 1,
        StoppageClass::Fault => 2,
    }
}

/// One legend row: a (rationale, reason) pair and its event count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LegendEntry {
    pub rationale: String,
    pub reason: String,
    pub count: i64,
}

/// Chart legend: counts grouped by reason within rationale, largest first.
/// The sort is stable, so equal counts keep their first-seen order.
pub fn stoppage_legend(events: &[EventRecord]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();

    for event in events {
        let reason = event.reason.as_deref().unwrap_or(REASON_NOT_RECORDED);
        match entries
            .iter_mut()
            .find(|e| e.rationale == event.rationale && e.reason == reason)
        {
            Some(entry) => entry.count += 1,
            None => entries.push(LegendEntry {
                rationale: event.rationale.clone(),
                reason: reason.to_string(),
                count: 1,
            }),
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// One currently-offline turbine (an event with no finish time yet).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfflineTurbine {
    pub turbine: String,
    pub windfarm: String,
    pub rationale: String,
    pub reason: Option<String>,
    pub down_began: NaiveDateTime,
    pub hours_down: f64,
}

/// Rows for the offline-turbines panel, from open events only.
pub fn offline_turbines(events: &[EventRecord], now: NaiveDateTime) -> Vec<OfflineTurbine> {
    events
        .iter()
        .filter(|e| e.finished.is_none())
        .map(|e| OfflineTurbine {
            turbine: e.turbine.clone(),
            windfarm: e.windfarm.clone(),
            rationale: e.rationale.clone(),
            reason: e.reason.clone(),
            down_began: e.down_began,
            hours_down: e.downtime_hours(now),
        })
        .collect()
}
