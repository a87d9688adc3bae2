//! Scheduling of the daily export run.
//!
//! The decision logic is pure so it can be tested without clocks or
//! timers: [`reconcile`] looks at "now", the currently registered trigger,
//! and the force flag, and says whether to keep or (re)register. A small
//! JSON state file persists the registration between invocations, standing
//! in for the host platform's cron table; [`tick`] drives one pass over it.

use std::path::Path;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Offset past midnight for the daily run, in seconds.
pub const RUN_OFFSET_SECS: i64 = 600;

/// The next regular trigger time: midnight of tomorrow plus the offset.
pub fn expected_run_time(now: NaiveDateTime) -> NaiveDateTime {
    let tomorrow = now.date().succ_opt().unwrap_or(now.date());
    tomorrow.and_time(NaiveTime::MIN) + Duration::seconds(RUN_OFFSET_SECS)
}

/// Outcome of comparing the registered trigger with the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    /// The registration already matches; leave it alone.
    Keep,
    /// Drop any existing registration and register a daily trigger at
    /// this time.
    Register(NaiveDateTime),
}

/// Decides whether the trigger registration needs to change.
///
/// A set force flag always wins and registers for `now`, so the export
/// runs on the next tick. Otherwise the trigger is (re)registered only
/// when it differs from the expected time, making repeated startups with
/// no state change a no-op.
pub fn reconcile(
    now: NaiveDateTime,
    scheduled: Option<NaiveDateTime>,
    force: bool,
) -> ScheduleAction {
    if force {
        return ScheduleAction::Register(now);
    }

    let expected = expected_run_time(now);
    match scheduled {
        Some(at) if at == expected => ScheduleAction::Keep,
        _ => ScheduleAction::Register(expected),
    }
}

/// Renders a trigger time for log output, `YYYY-MM-DD HH:MM:SS`.
pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Persisted trigger registration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleState {
    pub next_run: Option<NaiveDateTime>,
}

/// Loads the schedule state; a missing file means nothing is registered.
pub fn load_state(path: &Path) -> Result<ScheduleState> {
    if !path.exists() {
        return Ok(ScheduleState::default());
    }

    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes the schedule state as pretty-printed JSON.
pub fn save_state(path: &Path, state: &ScheduleState) -> Result<()> {
    let raw = serde_json::to_string_pretty(state)?;
    std::fs::write(path, raw)?;
    Ok(())
}

/// Advances the state by one tick and reports whether the export is due.
///
/// A due trigger (or a forced run) fires now and re-registers for the
/// next regular time; otherwise the registration is reconciled in place.
pub fn tick(state: &mut ScheduleState, now: NaiveDateTime, force: bool) -> bool {
    let due = force || state.next_run.is_some_and(|at| at <= now);
    if due {
        state.next_run = Some(expected_run_time(now));
        return true;
    }

    if let ScheduleAction::Register(at) = reconcile(now, state.next_run, force) {
        state.next_run = Some(at);
    }

    false
}
