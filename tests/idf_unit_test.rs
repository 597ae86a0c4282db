//! Unit tests for the IDF stop-code partition.
//!
//! Run with: cargo test --test idf_unit_test

use chrono::NaiveDateTime;
use rcc_api::report::EventRecord;
use rcc_api::report::idf::{
    CALLOUT_HOURS, IDF_CURTAILMENT_DISPLAY_CODE, IDF_CURTAILMENT_STOP_CODE,
    IDF_RESTART_DISPLAY_CODE, IDF_RESTART_STOP_CODE, callout_time_saved, idf_headings,
};

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn stop_event(stop_code: Option<i32>, down: &str, finish: &str, agent: &str) -> EventRecord {
    EventRecord {
        id: 0,
        windfarm: "WF1".to_string(),
        turbine: "T01".to_string(),
        rationale: "IDF Fault".to_string(),
        reason: None,
        fault_code: None,
        fault_description: None,
        stop_code_id: stop_code,
        reset_agent: Some(agent.to_string()),
        reset_type: None,
        down_began: ts(down),
        maintenance_began: None,
        finished: Some(ts(finish)),
        note: None,
    }
}

#[test]
fn both_buckets_always_present() {
    let headings = idf_headings(&[]);

    assert_eq!(headings.len(), 2);
    assert_eq!(headings[0].code, IDF_RESTART_DISPLAY_CODE);
    assert_eq!(headings[1].code, IDF_CURTAILMENT_DISPLAY_CODE);
    assert_eq!(headings[0].count, 0);
    assert_eq!(headings[0].avg_downtime_hours, 0.0);
    assert_eq!(headings[1].time_saved_hours, 0.0);
}

#[test]
fn events_partition_by_stop_code() {
    let events = vec![
        stop_event(
            Some(IDF_RESTART_STOP_CODE),
            "2026-03-01 01:00:00",
            "2026-03-01 02:00:00",
            "RCC",
        ),
        stop_event(
            Some(IDF_RESTART_STOP_CODE),
            "2026-03-01 03:00:00",
            "2026-03-01 06:00:00",
            "RCC",
        ),
        stop_event(
            Some(IDF_CURTAILMENT_STOP_CODE),
            "2026-03-01 04:00:00",
            "2026-03-01 04:30:00",
            "RCC",
        ),
        // Other stop codes and uncoded events fall outside both buckets.
        stop_event(Some(205), "2026-03-01 05:00:00", "2026-03-01 06:00:00", "RCC"),
        stop_event(None, "2026-03-01 05:00:00", "2026-03-01 06:00:00", "RCC"),
    ];

    let headings = idf_headings(&events);
    assert_eq!(headings[0].count, 2);
    assert_eq!(headings[1].count, 1);

    // Restart downtimes 1h and 3h.
    assert!((headings[0].avg_downtime_hours - 2.0).abs() < 1e-9);
    assert!((headings[1].avg_downtime_hours - 0.5).abs() < 1e-9);
}

#[test]
fn time_saved_counts_rcc_resets_only() {
    let events = vec![
        // RCC reset after 30 minutes saves 1.5h of the callout.
        stop_event(
            Some(IDF_RESTART_STOP_CODE),
            "2026-03-01 01:00:00",
            "2026-03-01 01:30:00",
            "RCC",
        ),
        // Same downtime by site crew saves nothing.
        stop_event(
            Some(IDF_RESTART_STOP_CODE),
            "2026-03-01 02:00:00",
            "2026-03-01 02:30:00",
            "Site",
        ),
        // Downtime beyond the callout budget saves nothing either.
        stop_event(
            Some(IDF_RESTART_STOP_CODE),
            "2026-03-01 03:00:00",
            "2026-03-01 06:00:00",
            "RCC",
        ),
    ];

    let headings = idf_headings(&events);
    assert!((headings[0].time_saved_hours - 1.5).abs() < 1e-9);
}

#[test]
fn callout_saving_is_capped_and_floored() {
    assert!((callout_time_saved(0.0) - CALLOUT_HOURS).abs() < 1e-9);
    assert!((callout_time_saved(0.5) - 1.5).abs() < 1e-9);
    assert_eq!(callout_time_saved(CALLOUT_HOURS), 0.0);
    assert_eq!(callout_time_saved(5.0), 0.0);
}
