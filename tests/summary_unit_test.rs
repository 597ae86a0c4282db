//! Unit tests for the stoppage summary builders.
//!
//! Run with: cargo test --test summary_unit_test

use chrono::NaiveDateTime;
use rcc_api::report::EventRecord;
use rcc_api::report::classify::StoppageClass;
use rcc_api::report::summary::{
    REASON_NOT_RECORDED, class_breakdown, offline_turbines, stoppage_headings, stoppage_legend,
    summary_by_windfarm,
};

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn event(windfarm: &str, rationale: &str, down: &str) -> EventRecord {
    EventRecord {
        id: 0,
        windfarm: windfarm.to_string(),
        turbine: "T01".to_string(),
        rationale: rationale.to_string(),
        reason: None,
        fault_code: None,
        fault_description: None,
        stop_code_id: None,
        reset_agent: None,
        reset_type: None,
        down_began: ts(down),
        maintenance_began: None,
        finished: None,
        note: None,
    }
}

fn finished(mut e: EventRecord, at: &str) -> EventRecord {
    e.finished = Some(ts(at));
    e
}

fn maintained(mut e: EventRecord, began: &str) -> EventRecord {
    e.maintenance_began = Some(ts(began));
    e
}

fn with_reason(mut e: EventRecord, reason: &str) -> EventRecord {
    e.reason = Some(reason.to_string());
    e
}

#[test]
fn headings_partition_adds_up() {
    let events = vec![
        event("WF1", "Schedule Service", "2026-03-01 08:00:00"),
        event("WF1", "Fault", "2026-03-01 09:00:00"),
        event("WF2", "IDF Fault", "2026-03-01 10:00:00"),
        event("WF2", "Grid Outage", "2026-03-01 11:00:00"),
        event("WF2", "Weather", "2026-03-01 12:00:00"),
    ];

    let headings = stoppage_headings(&events);
    assert_eq!(headings.total, 5);
    assert_eq!(headings.scheduled, 1);
    assert_eq!(headings.non_scheduled, 2);
    assert_eq!(headings.faults, 2);
    assert_eq!(
        headings.total,
        headings.scheduled + headings.non_scheduled + headings.faults
    );
}

#[test]
fn headings_averages_skip_missing_anchors() {
    let events = vec![
        // 2h downtime, 1.5h maintenance.
        finished(
            maintained(
                event("WF1", "Schedule Service", "2026-03-01 10:00:00"),
                "2026-03-01 10:30:00",
            ),
            "2026-03-01 12:00:00",
        ),
        // 4h downtime, no maintenance anchor.
        finished(
            event("WF1", "Fault", "2026-03-01 08:00:00"),
            "2026-03-01 12:00:00",
        ),
        // Still open: contributes to neither average.
        event("WF1", "Fault", "2026-03-01 09:00:00"),
    ];

    let headings = stoppage_headings(&events);
    assert!((headings.avg_downtime_hours - 3.0).abs() < 1e-9);
    assert!((headings.avg_maintenance_hours - 1.5).abs() < 1e-9);
}

#[test]
fn empty_set_averages_are_zero() {
    let headings = stoppage_headings(&[]);
    assert_eq!(headings.total, 0);
    assert_eq!(headings.avg_downtime_hours, 0.0);
    assert_eq!(headings.avg_maintenance_hours, 0.0);

    let breakdown = class_breakdown(&[], StoppageClass::Scheduled);
    assert_eq!(breakdown.count, 0);
    assert_eq!(breakdown.avg_downtime_hours, 0.0);
    assert_eq!(breakdown.avg_maintenance_hours, 0.0);
}

#[test]
fn class_breakdown_selects_one_class() {
    let events = vec![
        finished(
            event("WF1", "Schedule Service", "2026-03-01 10:00:00"),
            "2026-03-01 12:00:00",
        ),
        finished(
            event("WF1", "Fault", "2026-03-01 10:00:00"),
            "2026-03-01 11:00:00",
        ),
        finished(
            event("WF1", "IDF Fault", "2026-03-01 10:00:00"),
            "2026-03-01 13:00:00",
        ),
    ];

    let services = class_breakdown(&events, StoppageClass::Scheduled);
    assert_eq!(services.count, 1);
    assert!((services.avg_downtime_hours - 2.0).abs() < 1e-9);

    // Fault and IDF Fault land in the same bucket.
    let faults = class_breakdown(&events, StoppageClass::Fault);
    assert_eq!(faults.count, 2);
    assert!((faults.avg_downtime_hours - 2.0).abs() < 1e-9);
}

#[test]
fn summary_keeps_first_seen_farm_order() {
    let events = vec![
        finished(
            maintained(
                event("BETA", "Schedule Service", "2026-03-01 08:00:00"),
                "2026-03-01 10:00:00",
            ),
            "2026-03-01 12:00:00",
        ),
        finished(
            event("BETA", "Fault", "2026-03-02 08:00:00"),
            "2026-03-02 10:00:00",
        ),
        event("ALPA", "Grid Outage", "2026-03-03 08:00:00"),
    ];

    let (stoppages, averages) = summary_by_windfarm(&events);

    // BETA was seen first; only non-empty class buckets are emitted.
    let triples: Vec<(&str, &str, i64)> = stoppages
        .iter()
        .map(|s| (s.windfarm.as_str(), s.kind.as_str(), s.count))
        .collect();
    assert_eq!(
        triples,
        vec![
            ("BETA", "Scheduled", 1),
            ("BETA", "Fault", 1),
            ("ALPA", "Non-scheduled", 1),
        ]
    );

    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].windfarm, "BETA");
    // BETA: downtime mean of 4h and 2h, service hours from the one
    // scheduled event.
    assert!((averages[0].avg_downtime_hours - 3.0).abs() < 1e-9);
    assert!((averages[0].avg_service_hours - 2.0).abs() < 1e-9);
    // ALPA's only event is open, so both averages fall back to zero.
    assert_eq!(averages[1].avg_downtime_hours, 0.0);
    assert_eq!(averages[1].avg_service_hours, 0.0);
}

#[test]
fn legend_sorts_by_count_descending() {
    let mut events = Vec::new();
    for _ in 0..3 {
        events.push(with_reason(
            event("WF1", "Fault", "2026-03-01 08:00:00"),
            "Gearbox",
        ));
    }
    events.push(with_reason(
        event("WF1", "Fault", "2026-03-01 09:00:00"),
        "Yaw",
    ));
    for _ in 0..2 {
        events.push(event("WF1", "Schedule Service", "2026-03-01 10:00:00"));
    }

    let legend = stoppage_legend(&events);
    let rows: Vec<(&str, &str, i64)> = legend
        .iter()
        .map(|l| (l.rationale.as_str(), l.reason.as_str(), l.count))
        .collect();

    // Counts [3, 1, 2] come out [3, 2, 1]; missing reasons get the
    // placeholder label.
    assert_eq!(
        rows,
        vec![
            ("Fault", "Gearbox", 3),
            ("Schedule Service", REASON_NOT_RECORDED, 2),
            ("Fault", "Yaw", 1),
        ]
    );
}

#[test]
fn legend_ties_keep_first_seen_order() {
    let mut events = Vec::new();
    for _ in 0..2 {
        events.push(with_reason(
            event("WF1", "Fault", "2026-03-01 08:00:00"),
            "First",
        ));
    }
    for _ in 0..2 {
        events.push(with_reason(
            event("WF1", "Fault", "2026-03-01 09:00:00"),
            "Second",
        ));
    }

    let legend = stoppage_legend(&events);
    assert_eq!(legend[0].reason, "First");
    assert_eq!(legend[1].reason, "Second");
}

#[test]
fn offline_reports_open_events_with_hours_down() {
    let events = vec![
        with_reason(
            event("WF1", "Fault", "2026-03-01 06:00:00"),
            "Converter",
        ),
        // Already finished: not offline.
        finished(
            event("WF1", "Fault", "2026-03-01 02:00:00"),
            "2026-03-01 04:00:00",
        ),
    ];

    let rows = offline_turbines(&events, ts("2026-03-01 18:30:00"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].windfarm, "WF1");
    assert_eq!(rows[0].reason.as_deref(), Some("Converter"));
    assert!((rows[0].hours_down - 12.5).abs() < 1e-9);
}
