//! Step a calendar through a time range and record every unlock.

use advent_core::{
    Calendar, CalendarConfig, Day, MemoryStore, RevealedSet, RevealedStore, TileViewState,
    UnlockSchedule,
};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimelineError {
    #[error("timeline end {to} is before start {from}")]
    EmptyRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    #[error("step must be at least one minute, got {0}")]
    InvalidStep(i64),
}

#[derive(Debug, Clone)]
pub struct TimelinePlan {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub step_minutes: i64,
    pub revealed: Vec<Day>,
}

/// A pass that flagged at least one tile.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimelineEvent {
    pub at: NaiveDateTime,
    pub unlocked: Vec<Day>,
    pub unlocked_total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub step_minutes: i64,
    pub passes: usize,
    pub revealed: Vec<Day>,
    pub events: Vec<TimelineEvent>,
    /// Next unlock after `to`, if any remains this year.
    pub next_unlock: Option<(Day, NaiveDateTime)>,
    pub final_tiles: Vec<TileViewState>,
}

/// Run one pass every `step_minutes` from `from` to `to` inclusive.
///
/// The calendar is primed at `from`, so days already open at the start are
/// not reported.
///
/// # Errors
///
/// Returns an error for an inverted range or a non-positive step.
pub fn run_timeline(
    config: &CalendarConfig,
    plan: &TimelinePlan,
) -> Result<TimelineReport, TimelineError> {
    if plan.to < plan.from {
        return Err(TimelineError::EmptyRange {
            from: plan.from,
            to: plan.to,
        });
    }
    if plan.step_minutes < 1 {
        return Err(TimelineError::InvalidStep(plan.step_minutes));
    }

    let store = MemoryStore::new();
    let seeded: RevealedSet = plan.revealed.iter().copied().collect();
    let Ok(()) = store.write(&config.storage_key, &seeded.to_json());
    let mut calendar = Calendar::new(store, config, plan.from);

    let step = Duration::minutes(plan.step_minutes);
    let mut now = plan.from;
    let mut passes = 0;
    let mut events = Vec::new();
    let mut final_tiles = Vec::new();
    while now <= plan.to {
        let view = calendar.pass(now);
        passes += 1;
        let unlocked = view.just_unlocked();
        if !unlocked.is_empty() {
            events.push(TimelineEvent {
                at: now,
                unlocked,
                unlocked_total: view.tiles.iter().filter(|t| t.unlocked).count(),
            });
        }
        final_tiles = view.tiles;
        now += step;
    }

    Ok(TimelineReport {
        from: plan.from,
        to: plan.to,
        step_minutes: plan.step_minutes,
        passes,
        revealed: seeded.as_slice().to_vec(),
        events,
        next_unlock: UnlockSchedule::new(config.unlock_hour).next_unlock(plan.to),
        final_tiles,
    })
}
