//! Unit tests for the overnight-reset window matching and saving estimate.
//!
//! Run with: cargo test --test overnight_unit_test

use chrono::{NaiveDate, NaiveDateTime};
use rcc_api::report::overnight::{
    NightWindow, matching_night, night_windows, overnight_candidates, overnight_row,
    prorated_energy, saved_hours,
};
use rcc_api::report::{DateRange, EventRecord};

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn fault(windfarm: &str, down: &str, finish: &str, agent: &str) -> EventRecord {
    EventRecord {
        id: 0,
        windfarm: windfarm.to_string(),
        turbine: "T01".to_string(),
        rationale: "Fault".to_string(),
        reason: None,
        fault_code: Some(310),
        fault_description: Some("Converter trip".to_string()),
        stop_code_id: None,
        reset_agent: Some(agent.to_string()),
        reset_type: None,
        down_began: ts(down),
        maintenance_began: None,
        finished: Some(ts(finish)),
        note: None,
    }
}

#[test]
fn window_spans_previous_evening_to_morning() {
    let window = NightWindow::leading_into(day("2026-03-10")).unwrap();

    assert_eq!(window.start, ts("2026-03-09 19:00:00"));
    assert_eq!(window.end, ts("2026-03-10 07:00:00"));
}

#[test]
fn window_boundaries_are_inclusive_start_exclusive_end() {
    let window = NightWindow::leading_into(day("2026-03-10")).unwrap();

    assert!(!window.contains(ts("2026-03-09 18:59:00")));
    assert!(window.contains(ts("2026-03-09 19:00:00")));
    assert!(window.contains(ts("2026-03-10 06:59:00")));
    assert!(!window.contains(ts("2026-03-10 07:00:00")));
}

#[test]
fn one_window_per_day_of_range() {
    let range = DateRange::parse("2026-03-10", "2026-03-12").unwrap();
    let windows = night_windows(&range);

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].day, day("2026-03-10"));
    assert_eq!(windows[2].day, day("2026-03-12"));
    assert_eq!(windows[2].start, ts("2026-03-11 19:00:00"));
}

#[test]
fn matching_returns_the_containing_night() {
    let range = DateRange::parse("2026-03-10", "2026-03-12").unwrap();
    let windows = night_windows(&range);

    let hit = matching_night(&windows, ts("2026-03-10 22:00:00")).unwrap();
    assert_eq!(hit.day, day("2026-03-11"));

    // Daytime start matches no night.
    assert!(matching_night(&windows, ts("2026-03-10 12:00:00")).is_none());
}

#[test]
fn candidates_require_fault_class_rcc_reset_and_finish() {
    let range = DateRange::parse("2026-03-10", "2026-03-11").unwrap();
    let windows = night_windows(&range);

    let mut open_event = fault("WF1", "2026-03-10 21:00:00", "2026-03-10 22:00:00", "RCC");
    open_event.finished = None;

    let mut service = fault("WF1", "2026-03-10 20:00:00", "2026-03-10 21:00:00", "RCC");
    service.rationale = "Schedule Service".to_string();

    let events = vec![
        // The one real candidate.
        fault("WF1", "2026-03-10 21:30:00", "2026-03-10 22:00:00", "RCC"),
        // Reset by site crew.
        fault("WF1", "2026-03-10 21:00:00", "2026-03-10 22:00:00", "Site"),
        // Daytime start.
        fault("WF1", "2026-03-10 14:00:00", "2026-03-10 15:00:00", "RCC"),
        open_event,
        service,
    ];

    let candidates = overnight_candidates(&events, &windows);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].event.down_began, ts("2026-03-10 21:30:00"));
    assert_eq!(candidates[0].window.day, day("2026-03-11"));
}

#[test]
fn saved_hours_floor_at_zero() {
    let window_end = ts("2026-03-10 07:00:00");

    assert!((saved_hours(window_end, ts("2026-03-10 05:00:00")) - 2.0).abs() < 1e-9);
    // Reset completed after the window closed saves nothing.
    assert_eq!(saved_hours(window_end, ts("2026-03-10 08:30:00")), 0.0);
}

#[test]
fn prorated_energy_shares_the_day() {
    // 48 MWh over 24h, two hours saved.
    assert!((prorated_energy(Some(48.0), 2.0) - 4.0).abs() < 1e-9);
    // Rounded to three decimals: 10 / 24 = 0.41666...
    assert!((prorated_energy(Some(10.0), 1.0) - 0.417).abs() < 1e-9);
    // No stats row for the day.
    assert_eq!(prorated_energy(None, 2.0), 0.0);
}

#[test]
fn row_carries_the_night_and_the_estimate() {
    let range = DateRange::parse("2026-03-10", "2026-03-10").unwrap();
    let windows = night_windows(&range);

    let events = vec![fault(
        "WF1",
        "2026-03-09 23:00:00",
        "2026-03-10 05:00:00",
        "RCC",
    )];
    let candidates = overnight_candidates(&events, &windows);
    assert_eq!(candidates.len(), 1);

    let row = overnight_row(&candidates[0], Some(24.0));
    assert_eq!(row.night, day("2026-03-10"));
    assert_eq!(row.fault_code, Some(310));
    // Two hours of night left after the reset, at 1 MWh per hour.
    assert!((row.saved_hours - 2.0).abs() < 1e-9);
    assert!((row.saved_energy_mwh - 2.0).abs() < 1e-9);
}
