//! Unlock schedule: which tiles are open at a given instant.
//!
//! Every day unlocks at `unlock_hour` local time on the matching December day
//! of the evaluated instant's own year. The evaluated instant may be simulated,
//! so the real system clock never enters these functions.

use crate::constants::{DEFAULT_UNLOCK_HOUR, UNLOCK_MONTH};
use crate::day::Day;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

/// Days unlocked at some instant, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockedSet(BTreeSet<Day>);

impl UnlockedSet {
    #[must_use]
    pub fn contains(&self, day: Day) -> bool {
        self.0.contains(&day)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.iter().copied()
    }

    /// Days present here but absent from `previous`, ascending.
    #[must_use]
    pub fn newly_unlocked(&self, previous: &Self) -> Vec<Day> {
        self.0.difference(&previous.0).copied().collect()
    }
}

impl FromIterator<Day> for UnlockedSet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockSchedule {
    unlock_hour: u32,
}

impl Default for UnlockSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_UNLOCK_HOUR)
    }
}

impl UnlockSchedule {
    /// Hours past 23 are clamped to 23.
    #[must_use]
    pub fn new(unlock_hour: u32) -> Self {
        Self {
            unlock_hour: unlock_hour.min(23),
        }
    }

    #[must_use]
    pub const fn unlock_hour(&self) -> u32 {
        self.unlock_hour
    }

    /// The instant `day` unlocks in `year`.
    ///
    /// Only `None` for years outside chrono's representable range.
    #[must_use]
    pub fn unlock_instant(&self, day: Day, year: i32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, UNLOCK_MONTH, u32::from(day.get()))
            .and_then(|date| date.and_hms_opt(self.unlock_hour, 0, 0))
    }

    /// Inclusive: a tile is unlocked at exactly its unlock instant.
    #[must_use]
    pub fn is_unlocked(&self, day: Day, now: NaiveDateTime) -> bool {
        self.unlock_instant(day, now.year())
            .is_some_and(|instant| now >= instant)
    }

    #[must_use]
    pub fn unlocked_days(&self, now: NaiveDateTime) -> UnlockedSet {
        Day::all().filter(|&day| self.is_unlocked(day, now)).collect()
    }

    /// Earliest day still locked at `now`, with the instant it opens.
    #[must_use]
    pub fn next_unlock(&self, now: NaiveDateTime) -> Option<(Day, NaiveDateTime)> {
        Day::all().find_map(|day| {
            self.unlock_instant(day, now.year())
                .filter(|instant| now < *instant)
                .map(|instant| (day, instant))
        })
    }
}

/// [`UnlockSchedule::is_unlocked`] with the default 06:00 unlock hour.
#[must_use]
pub fn is_unlocked(day: Day, now: NaiveDateTime) -> bool {
    UnlockSchedule::default().is_unlocked(day, now)
}

/// [`UnlockSchedule::unlocked_days`] with the default 06:00 unlock hour.
#[must_use]
pub fn unlocked_days(now: NaiveDateTime) -> UnlockedSet {
    UnlockSchedule::default().unlocked_days(now)
}
