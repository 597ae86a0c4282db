//! Two-period comparison builders: weekly production vs stoppages, service
//! workload, fault frequency and IDF impact. Each builder aggregates one
//! period; the route calls it twice and concatenates the tagged rows.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::report::classify::{RATIONALE_IDF_FAULT, StoppageClass};
use crate::report::idf::callout_time_saved;
use crate::report::{EventRecord, ProductionDay, mean};

/// How many fault codes the frequency panel shows per period.
pub const TOP_FAULTS_LIMIT: usize = 10;

/// ISO week number used for all weekly bucketing.
pub fn week_of(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Production stats for one (ISO week, windfarm) bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionWeek {
    pub week: u32,
    pub windfarm: String,
    pub avg_wind_speed: f64,
    pub total_energy: f64,
}

/// Stoppage totals for one (ISO week, windfarm) bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct StoppageWeek {
    pub week: u32,
    pub windfarm: String,
    pub stoppages: i64,
    /// Summed hours over completed events in the bucket.
    pub downtime_hours: f64,
}

/// One merged row of the production-analysis panel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductionAnalysisRow {
    pub period: String,
    pub week: u32,
    pub windfarm: String,
    /// Null when the bucket had stoppages but no production stats.
    pub avg_wind_speed: Option<f64>,
    /// Null when the bucket had stoppages but no production stats.
    pub energy_export: Option<f64>,
    pub stoppages: i64,
    pub downtime_hours: f64,
}

/// Buckets daily production rows by (ISO week, windfarm), averaging wind
/// speed and summing exported energy. Buckets keep first-seen order.
pub fn production_by_week(days: &[ProductionDay]) -> Vec<ProductionWeek> {
    struct Accum {
        week: u32,
        windfarm: String,
        speeds: Vec<f64>,
        energy: f64,
    }

    let mut buckets: Vec<Accum> = Vec::new();
    for day in days {
        let week = week_of(day.stat_date);
        let idx = match buckets
            .iter()
            .position(|b| b.week == week && b.windfarm == day.windfarm)
        {
            Some(i) => i,
            None => {
                buckets.push(Accum {
                    week,
                    windfarm: day.windfarm.clone(),
                    speeds: Vec::new(),
                    energy: 0.0,
                });
                buckets.len() - 1
            }
        };
        if let Some(speed) = day.avg_wind_speed {
            buckets[idx].speeds.push(speed);
        }
        if let Some(energy) = day.energy_export {
            buckets[idx].energy += energy;
        }
    }

    buckets
        .into_iter()
        .map(|b| ProductionWeek {
            week: b.week,
            windfarm: b.windfarm,
            avg_wind_speed: mean(&b.speeds),
            total_energy: b.energy,
        })
        .collect()
}

/// Buckets events by (ISO week of down-begin, windfarm): count plus summed
/// completed downtime hours.
pub fn stoppages_by_week(events: &[EventRecord]) -> Vec<StoppageWeek> {
    let mut buckets: Vec<StoppageWeek> = Vec::new();
    for event in events {
        let week = week_of(event.down_began.date());
        let idx = match buckets
            .iter()
            .position(|b| b.week == week && b.windfarm == event.windfarm)
        {
            Some(i) => i,
            None => {
                buckets.push(StoppageWeek {
                    week,
                    windfarm: event.windfarm.clone(),
                    stoppages: 0,
                    downtime_hours: 0.0,
                });
                buckets.len() - 1
            }
        };
        buckets[idx].stoppages += 1;
        if let Some(hours) = event.completed_downtime_hours() {
            buckets[idx].downtime_hours += hours;
        }
    }
    buckets
}

/// Keyed merge of production and stoppage buckets on (week, windfarm).
///
/// Production rows drive the output and keep their order. Each stoppage
/// bucket matches at most once; a production row without a match reports
/// zero stoppages, and stoppage buckets left unmatched are appended with
/// null production fields.
pub fn merge_production_week(
    production: Vec<ProductionWeek>,
    stoppages: Vec<StoppageWeek>,
    period: &str,
) -> Vec<ProductionAnalysisRow> {
    let mut claimed = vec![false; stoppages.len()];
    let mut rows = Vec::with_capacity(production.len());

    for prod in production {
        let hit = stoppages
            .iter()
            .enumerate()
            .find(|(i, s)| !claimed[*i] && s.week == prod.week && s.windfarm == prod.windfarm);
        let (stoppage_count, downtime) = match hit {
            Some((i, s)) => {
                claimed[i] = true;
                (s.stoppages, s.downtime_hours)
            }
            None => (0, 0.0),
        };
        rows.push(ProductionAnalysisRow {
            period: period.to_string(),
            week: prod.week,
            windfarm: prod.windfarm,
            avg_wind_speed: Some(prod.avg_wind_speed),
            energy_export: Some(prod.total_energy),
            stoppages: stoppage_count,
            downtime_hours: downtime,
        });
    }

    for (i, leftover) in stoppages.into_iter().enumerate() {
        if !claimed[i] {
            rows.push(ProductionAnalysisRow {
                period: period.to_string(),
                week: leftover.week,
                windfarm: leftover.windfarm,
                avg_wind_speed: None,
                energy_export: None,
                stoppages: leftover.stoppages,
                downtime_hours: leftover.downtime_hours,
            });
        }
    }

    rows
}

/// One period of the production-analysis panel: bucket both sources by
/// (ISO week, windfarm), then merge.
pub fn production_analysis_period(
    days: &[ProductionDay],
    events: &[EventRecord],
    period: &str,
) -> Vec<ProductionAnalysisRow> {
    merge_production_week(production_by_week(days), stoppages_by_week(events), period)
}

/// Scheduled services per (ISO week, windfarm).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleServiceRow {
    pub period: String,
    pub week: u32,
    pub windfarm: String,
    pub services: i64,
    /// Mean maintenance-start to finish hours.
    pub avg_service_hours: f64,
}

pub fn schedule_services_by_week(events: &[EventRecord], period: &str) -> Vec<ScheduleServiceRow> {
    struct Accum {
        week: u32,
        windfarm: String,
        services: i64,
        hours: Vec<f64>,
    }

    let mut buckets: Vec<Accum> = Vec::new();
    for event in events {
        if event.class() != StoppageClass::Scheduled {
            continue;
        }
        let week = week_of(event.down_began.date());
        let idx = match buckets
            .iter()
            .position(|b| b.week == week && b.windfarm == event.windfarm)
        {
            Some(i) => i,
            None => {
                buckets.push(Accum {
                    week,
                    windfarm: event.windfarm.clone(),
                    services: 0,
                    hours: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        buckets[idx].services += 1;
        if let Some(hours) = event.maintenance_hours() {
            buckets[idx].hours.push(hours);
        }
    }

    buckets
        .into_iter()
        .map(|b| ScheduleServiceRow {
            period: period.to_string(),
            week: b.week,
            windfarm: b.windfarm,
            services: b.services,
            avg_service_hours: mean(&b.hours),
        })
        .collect()
}

/// Scheduled-service totals for one windfarm.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceAnalysisRow {
    pub period: String,
    pub windfarm: String,
    pub services: i64,
    pub avg_service_hours: f64,
    pub avg_downtime_hours: f64,
}

pub fn services_by_windfarm(events: &[EventRecord], period: &str) -> Vec<ServiceAnalysisRow> {
    struct Accum {
        windfarm: String,
        services: i64,
        service_hours: Vec<f64>,
        downtime_hours: Vec<f64>,
    }

    let mut farms: Vec<Accum> = Vec::new();
    for event in events {
        if event.class() != StoppageClass::Scheduled {
            continue;
        }
        let idx = match farms.iter().position(|f| f.windfarm == event.windfarm) {
            Some(i) => i,
            None => {
                farms.push(Accum {
                    windfarm: event.windfarm.clone(),
                    services: 0,
                    service_hours: Vec::new(),
                    downtime_hours: Vec::new(),
                });
                farms.len() - 1
            }
        };
        farms[idx].services += 1;
        if let Some(hours) = event.maintenance_hours() {
            farms[idx].service_hours.push(hours);
        }
        if let Some(hours) = event.completed_downtime_hours() {
            farms[idx].downtime_hours.push(hours);
        }
    }

    farms
        .into_iter()
        .map(|f| ServiceAnalysisRow {
            period: period.to_string(),
            windfarm: f.windfarm,
            services: f.services,
            avg_service_hours: mean(&f.service_hours),
            avg_downtime_hours: mean(&f.downtime_hours),
        })
        .collect()
}

/// Fault-code frequency row for the top-ten panel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FaultFrequencyRow {
    pub period: String,
    pub fault_code: i32,
    pub description: Option<String>,
    pub count: i64,
}

/// Fault-class events grouped by fault code, count descending with stable
/// first-seen tie-break, cut to the top ten. Events without a fault code
/// cannot be grouped and are skipped.
pub fn top_faults(events: &[EventRecord], period: &str) -> Vec<FaultFrequencyRow> {
    let mut rows: Vec<FaultFrequencyRow> = Vec::new();
    for event in events {
        if event.class() != StoppageClass::Fault {
            continue;
        }
        let Some(code) = event.fault_code else {
            continue;
        };
        match rows.iter_mut().find(|r| r.fault_code == code) {
            Some(row) => row.count += 1,
            None => rows.push(FaultFrequencyRow {
                period: period.to_string(),
                fault_code: code,
                description: event.fault_description.clone(),
                count: 1,
            }),
        }
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(TOP_FAULTS_LIMIT);
    rows
}

/// IDF-fault impact for one windfarm.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdfAnalysisRow {
    pub period: String,
    pub windfarm: String,
    pub faults: i64,
    pub avg_downtime_hours: f64,
    /// Summed callout hours avoided by remote resets.
    pub time_saved_hours: f64,
}

/// Events with the IDF rationale per windfarm: count, mean completed
/// downtime, and time saved summed over RCC resets only.
pub fn idf_faults_by_windfarm(events: &[EventRecord], period: &str) -> Vec<IdfAnalysisRow> {
    struct Accum {
        windfarm: String,
        faults: i64,
        downtime: Vec<f64>,
        saved: f64,
    }

    let mut farms: Vec<Accum> = Vec::new();
    for event in events {
        if event.rationale != RATIONALE_IDF_FAULT {
            continue;
        }
        let idx = match farms.iter().position(|f| f.windfarm == event.windfarm) {
            Some(i) => i,
            None => {
                farms.push(Accum {
                    windfarm: event.windfarm.clone(),
                    faults: 0,
                    downtime: Vec::new(),
                    saved: 0.0,
                });
                farms.len() - 1
            }
        };
        farms[idx].faults += 1;
        if let Some(hours) = event.completed_downtime_hours() {
            farms[idx].downtime.push(hours);
            if event.is_rcc_reset() {
                farms[idx].saved += callout_time_saved(hours);
            }
        }
    }

    farms
        .into_iter()
        .map(|f| IdfAnalysisRow {
            period: period.to_string(),
            windfarm: f.windfarm,
            faults: f.faults,
            avg_downtime_hours: mean(&f.downtime),
            time_saved_hours: f.saved,
        })
        .collect()
}
