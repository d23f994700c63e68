//! The coordinating calendar context.
//!
//! `Calendar` owns everything that outlives a single reconciliation pass: the
//! revealed store, the active time source, the previous unlocked snapshot and
//! the loaded content. Frontends hold one instance and drive it from their
//! timer and user actions; passes never overlap because the owner is
//! single-threaded.

use crate::clock::{Clock, TimeSource};
use crate::config::CalendarConfig;
use crate::constants::debug_log_enabled;
use crate::content::{ContentTable, DayDetail, question_text};
use crate::day::Day;
use crate::loader::{ContentStatus, LoadOutcome, UnavailableReason};
use crate::reconcile::TileViewState;
use crate::revealed::{RevealedSet, mark_done};
use crate::schedule::{UnlockSchedule, UnlockedSet};
use crate::store::{RevealedStore, load_revealed, save_revealed};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::time::Duration;

/// Identifies one content load so late completions can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// The render-ready output of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub now: NaiveDateTime,
    pub tiles: Vec<TileViewState>,
    /// Number of revealed days.
    pub progress: usize,
    pub content_status: ContentStatus,
    pub simulated: bool,
}

impl CalendarView {
    #[must_use]
    pub fn tile(&self, day: Day) -> Option<&TileViewState> {
        self.tiles.get(day.index())
    }

    #[must_use]
    pub fn just_unlocked(&self) -> Vec<Day> {
        self.tiles
            .iter()
            .filter(|tile| tile.just_unlocked)
            .map(|tile| tile.day)
            .collect()
    }
}

pub struct Calendar<S: RevealedStore> {
    store: S,
    storage_key: String,
    content_document: String,
    refresh_interval: Duration,
    schedule: UnlockSchedule,
    time_source: TimeSource,
    previous_unlocked: UnlockedSet,
    content: Option<ContentTable>,
    content_status: ContentStatus,
    load_generation: u64,
}

impl<S: RevealedStore> Calendar<S> {
    /// Create a calendar primed with the days already unlocked at
    /// `startup_now`, so the first pass animates nothing.
    pub fn new(store: S, config: &CalendarConfig, startup_now: NaiveDateTime) -> Self {
        let schedule = UnlockSchedule::new(config.unlock_hour);
        Self {
            store,
            storage_key: config.storage_key.clone(),
            content_document: config.content_document.clone(),
            refresh_interval: config.refresh_interval(),
            previous_unlocked: schedule.unlocked_days(startup_now),
            schedule,
            time_source: TimeSource::Real,
            content: None,
            content_status: ContentStatus::Unavailable(UnavailableReason::NotLoaded),
            load_generation: 0,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn schedule(&self) -> &UnlockSchedule {
        &self.schedule
    }

    pub fn content_document(&self) -> &str {
        &self.content_document
    }

    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub const fn time_source(&self) -> TimeSource {
        self.time_source
    }

    /// Takes effect on the next pass.
    pub fn set_time_source(&mut self, source: TimeSource) {
        self.time_source = source;
    }

    /// The instant the next pass should evaluate.
    pub fn now<C: Clock + ?Sized>(&self, clock: &C) -> NaiveDateTime {
        self.time_source.resolve(clock)
    }

    pub fn revealed(&self) -> RevealedSet {
        load_revealed(&self.store, &self.storage_key)
    }

    pub const fn content(&self) -> Option<&ContentTable> {
        self.content.as_ref()
    }

    pub const fn content_status(&self) -> ContentStatus {
        self.content_status
    }

    /// Run one reconciliation pass at `now` and remember its unlocked set.
    pub fn pass(&mut self, now: NaiveDateTime) -> CalendarView {
        let revealed = self.revealed();
        let result = self
            .schedule
            .reconcile(now, &self.previous_unlocked, &revealed);
        if debug_log_enabled() {
            log::debug!(
                "pass at {now}: {} unlocked, {} revealed, just unlocked {:?}",
                result.unlocked.len(),
                revealed.len(),
                result.just_unlocked()
            );
        }
        self.previous_unlocked = result.unlocked;
        CalendarView {
            now,
            tiles: result.tiles,
            progress: revealed.len(),
            content_status: self.content_status,
            simulated: self.time_source.is_simulated(),
        }
    }

    /// Mark `day` done and persist before returning, so the next pass sees
    /// it revealed.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the updated set cannot be written.
    pub fn mark_done(&mut self, day: Day) -> Result<RevealedSet, S::Error> {
        let current = self.revealed();
        if current.contains(day) {
            return Ok(current);
        }
        let updated = mark_done(day, current);
        save_revealed(&self.store, &self.storage_key, &updated)?;
        log::debug!("day {day} marked done");
        Ok(updated)
    }

    /// Dialog model for `day`, or `None` while it is locked and unrevealed.
    pub fn open_day(&self, day: Day, now: NaiveDateTime) -> Option<DayDetail> {
        let revealed = self.revealed().contains(day);
        if !revealed && !self.schedule.is_unlocked(day, now) {
            return None;
        }
        Some(DayDetail::build(self.content.as_ref(), day, revealed))
    }

    pub fn question_text(&self, day: Day) -> String {
        question_text(self.content.as_ref(), day)
    }

    /// Start a load. The returned ticket must be handed back to
    /// [`Self::finish_content_load`].
    pub fn begin_content_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.content_status = ContentStatus::Loading;
        LoadTicket(self.load_generation)
    }

    /// Apply a finished load. Outcomes from superseded tickets are dropped
    /// and `false` is returned.
    pub fn finish_content_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if ticket.0 != self.load_generation {
            log::debug!(
                "dropping stale content load {} (latest {})",
                ticket.0,
                self.load_generation
            );
            return false;
        }
        self.content_status = outcome.status();
        if let LoadOutcome::Loaded(table) = outcome {
            self.content = Some(table);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRecord, accept_content};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    fn table(prefix: &str) -> ContentTable {
        let records: Vec<ContentRecord> = (1..=24)
            .map(|n| ContentRecord {
                day: Some(n),
                question: Some(format!("{prefix} {n}")),
                ..ContentRecord::default()
            })
            .collect();
        accept_content(&records).unwrap()
    }

    fn calendar(now: NaiveDateTime) -> Calendar<MemoryStore> {
        Calendar::new(MemoryStore::new(), &CalendarConfig::default(), now)
    }

    #[test]
    fn first_pass_after_startup_animates_nothing() {
        let now = at(2025, 12, 10, 12, 0);
        let mut cal = calendar(now);
        let view = cal.pass(now);
        assert!(view.just_unlocked().is_empty());
        assert_eq!(view.tiles.iter().filter(|t| t.unlocked).count(), 10);
    }

    #[test]
    fn transition_is_flagged_once() {
        let mut cal = calendar(at(2025, 12, 6, 5, 59));
        let view = cal.pass(at(2025, 12, 6, 6, 0));
        assert_eq!(view.just_unlocked(), vec![day(6)]);
        let view = cal.pass(at(2025, 12, 6, 6, 1));
        assert!(view.just_unlocked().is_empty());
    }

    #[test]
    fn marked_day_is_revealed_on_next_pass() {
        let now = at(2025, 12, 4, 8, 0);
        let mut cal = calendar(now);
        let updated = cal.mark_done(day(3)).unwrap();
        assert!(updated.contains(day(3)));
        assert_eq!(cal.store().raw("advent.revealed").as_deref(), Some("[3]"));

        let view = cal.pass(now);
        assert!(view.tile(day(3)).unwrap().revealed);
        assert_eq!(view.progress, 1);

        cal.mark_done(day(3)).unwrap();
        assert_eq!(cal.revealed().len(), 1);
    }

    #[test]
    fn malformed_storage_reconciles_as_empty() {
        let store = MemoryStore::new().with_value("advent.revealed", "{broken");
        let now = at(2025, 12, 2, 9, 0);
        let mut cal = Calendar::new(store, &CalendarConfig::default(), now);
        let view = cal.pass(now);
        assert_eq!(view.progress, 0);
        assert!(view.tiles.iter().all(|t| !t.revealed));
        let repaired = cal.mark_done(day(1)).unwrap();
        assert_eq!(repaired.to_json(), "[1]");
    }

    #[test]
    fn simulation_switch_applies_on_next_pass() {
        let real = crate::clock::FixedClock(at(2025, 6, 1, 12, 0));
        let mut cal = calendar(real.0);
        let view = cal.pass(cal.now(&real));
        assert!(!view.simulated);
        assert!(view.tiles.iter().all(|t| !t.unlocked));

        cal.set_time_source(TimeSource::Simulated(at(2025, 12, 2, 6, 0)));
        let view = cal.pass(cal.now(&real));
        assert!(view.simulated);
        assert_eq!(view.just_unlocked(), vec![day(1), day(2)]);

        cal.set_time_source(TimeSource::Real);
        let view = cal.pass(cal.now(&real));
        assert!(!view.simulated);
        assert!(view.just_unlocked().is_empty());
    }

    #[test]
    fn open_day_respects_lock_and_reveal() {
        let now = at(2025, 12, 5, 12, 0);
        let mut cal = calendar(now);
        assert!(cal.open_day(day(6), now).is_none());
        let detail = cal.open_day(day(5), now).unwrap();
        assert!(!detail.already_revealed);

        cal.mark_done(day(5)).unwrap();
        assert!(cal.open_day(day(5), now).unwrap().already_revealed);

        let next_year = at(2026, 3, 1, 12, 0);
        assert!(cal.open_day(day(5), next_year).is_some());
        assert!(cal.open_day(day(4), next_year).is_none());
    }

    #[test]
    fn content_loads_replace_and_failures_keep_previous() {
        let mut cal = calendar(at(2025, 12, 1, 0, 0));
        assert_eq!(
            cal.content_status(),
            ContentStatus::Unavailable(UnavailableReason::NotLoaded)
        );

        let ticket = cal.begin_content_load();
        assert_eq!(cal.content_status(), ContentStatus::Loading);
        assert!(cal.finish_content_load(ticket, LoadOutcome::Loaded(table("First"))));
        assert_eq!(cal.question_text(day(2)), "First 2");

        let ticket = cal.begin_content_load();
        assert!(cal.finish_content_load(ticket, LoadOutcome::Rejected { entries: 23 }));
        assert_eq!(
            cal.content_status(),
            ContentStatus::Unavailable(UnavailableReason::Invalid)
        );
        assert_eq!(cal.question_text(day(2)), "First 2");
    }

    #[test]
    fn stale_load_completion_is_ignored() {
        let mut cal = calendar(at(2025, 12, 1, 0, 0));
        let older = cal.begin_content_load();
        let newer = cal.begin_content_load();
        assert!(cal.finish_content_load(newer, LoadOutcome::Loaded(table("New"))));
        assert!(!cal.finish_content_load(older, LoadOutcome::Loaded(table("Old"))));
        assert_eq!(cal.question_text(day(1)), "New 1");
        assert_eq!(cal.content_status(), ContentStatus::Loaded);
    }

    #[test]
    fn config_drives_schedule_and_interval() {
        let config = CalendarConfig {
            unlock_hour: 18,
            refresh_interval_secs: 30,
            ..CalendarConfig::default()
        };
        let now = at(2025, 12, 1, 12, 0);
        let mut cal = Calendar::new(MemoryStore::new(), &config, now);
        assert_eq!(cal.refresh_interval(), Duration::from_secs(30));
        assert!(cal.pass(now).tiles.iter().all(|t| !t.unlocked));
        assert_eq!(cal.pass(at(2025, 12, 1, 18, 0)).just_unlocked(), vec![day(1)]);
    }
}
