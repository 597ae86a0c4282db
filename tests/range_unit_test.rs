//! Unit tests for the date-range contract.
//!
//! Run with: cargo test --test range_unit_test

use chrono::{NaiveDate, NaiveDateTime};
use rcc_api::error::AppError;
use rcc_api::report::DateRange;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn whole_end_day_is_included() {
    let range = DateRange::parse("2026-03-01", "2026-03-10").unwrap();

    assert!(range.contains(ts("2026-03-01 00:00:00")));
    assert!(range.contains(ts("2026-03-10 23:59:59")));

    // One second past the end day is out, as is anything before the start.
    assert!(!range.contains(ts("2026-03-11 00:00:00")));
    assert!(!range.contains(ts("2026-02-28 23:59:59")));
}

#[test]
fn single_day_range_covers_that_day() {
    let range = DateRange::parse("2026-03-05", "2026-03-05").unwrap();

    assert!(range.contains(ts("2026-03-05 00:00:00")));
    assert!(range.contains(ts("2026-03-05 23:59:59")));
    assert_eq!(range.days().collect::<Vec<_>>(), vec![day("2026-03-05")]);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let range = DateRange::parse(" 2026-03-01 ", "2026-03-02\n").unwrap();

    assert_eq!(range.first_day, day("2026-03-01"));
    assert_eq!(range.last_day, day("2026-03-02"));
}

#[test]
fn malformed_dates_are_bad_requests() {
    for (start, end) in [
        ("03/01/2026", "2026-03-10"),
        ("2026-03-01", "notadate"),
        ("", ""),
        ("2026-02-30", "2026-03-01"),
    ] {
        assert!(
            matches!(DateRange::parse(start, end), Err(AppError::BadRequest(_))),
            "expected BadRequest for ({start}, {end})"
        );
    }
}

#[test]
fn reversed_range_is_rejected() {
    assert!(matches!(
        DateRange::parse("2026-03-10", "2026-03-01"),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn days_iterates_every_calendar_day() {
    let range = DateRange::parse("2026-02-27", "2026-03-02").unwrap();
    let days: Vec<NaiveDate> = range.days().collect();

    assert_eq!(
        days,
        vec![
            day("2026-02-27"),
            day("2026-02-28"),
            day("2026-03-01"),
            day("2026-03-02"),
        ]
    );
}
