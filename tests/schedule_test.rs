//! Tests for the pure scheduling logic and its persisted state.

use chrono::NaiveDateTime;

use tallysheet::schedule::{
    ScheduleAction, ScheduleState, expected_run_time, format_datetime, load_state, reconcile,
    save_state, tick,
};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn expected_time_is_tomorrow_midnight_plus_offset() {
    assert_eq!(
        expected_run_time(at("2024-03-14 15:30:00")),
        at("2024-03-15 00:10:00")
    );
    // Just before midnight still targets the next calendar day.
    assert_eq!(
        expected_run_time(at("2024-03-14 23:59:59")),
        at("2024-03-15 00:10:00")
    );
}

#[test]
fn reconcile_keeps_a_matching_registration() {
    let now = at("2024-03-14 15:30:00");
    assert_eq!(
        reconcile(now, Some(at("2024-03-15 00:10:00")), false),
        ScheduleAction::Keep
    );
}

#[test]
fn reconcile_registers_when_missing_or_stale() {
    let now = at("2024-03-14 15:30:00");
    let expected = at("2024-03-15 00:10:00");

    assert_eq!(reconcile(now, None, false), ScheduleAction::Register(expected));
    assert_eq!(
        reconcile(now, Some(at("2024-03-14 00:10:00")), false),
        ScheduleAction::Register(expected)
    );
}

#[test]
fn force_registers_for_now() {
    let now = at("2024-03-14 15:30:00");
    assert_eq!(
        reconcile(now, Some(at("2024-03-15 00:10:00")), true),
        ScheduleAction::Register(now)
    );
}

#[test]
fn tick_registers_then_stays_idempotent() {
    let mut state = ScheduleState::default();
    let now = at("2024-03-14 15:30:00");

    assert!(!tick(&mut state, now, false));
    assert_eq!(state.next_run, Some(at("2024-03-15 00:10:00")));

    // Same day again: nothing changes, nothing runs.
    assert!(!tick(&mut state, at("2024-03-14 18:00:00"), false));
    assert_eq!(state.next_run, Some(at("2024-03-15 00:10:00")));
}

#[test]
fn tick_fires_once_due_and_reregisters() {
    let mut state = ScheduleState {
        next_run: Some(at("2024-03-15 00:10:00")),
    };

    assert!(tick(&mut state, at("2024-03-15 00:12:00"), false));
    assert_eq!(state.next_run, Some(at("2024-03-16 00:10:00")));
}

#[test]
fn forced_tick_fires_immediately() {
    let mut state = ScheduleState {
        next_run: Some(at("2024-03-15 00:10:00")),
    };

    assert!(tick(&mut state, at("2024-03-14 09:00:00"), true));
    assert_eq!(state.next_run, Some(at("2024-03-15 00:10:00")));
}

#[test]
fn state_survives_a_disk_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.json");

    let state = ScheduleState {
        next_run: Some(at("2024-03-15 00:10:00")),
    };
    save_state(&path, &state).unwrap();

    let loaded = load_state(&path).unwrap();
    assert_eq!(loaded.next_run, state.next_run);
}

#[test]
fn missing_state_file_means_unscheduled() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_state(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.next_run.is_none());
}

#[test]
fn log_timestamps_use_iso_datetime() {
    assert_eq!(
        format_datetime(at("2024-03-15 00:10:00")),
        "2024-03-15 00:10:00"
    );
}
