use crate::day::Day;
use crate::revealed::RevealedSet;
use crate::schedule::{UnlockSchedule, UnlockedSet};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Render state of a single tile for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileViewState {
    pub day: Day,
    pub unlocked: bool,
    pub revealed: bool,
    /// Unlocked now but not in the previous pass; drives the one-shot cue.
    pub just_unlocked: bool,
}

impl TileViewState {
    /// Revealed days stay openable even if the lock policy would close them.
    #[must_use]
    pub const fn can_open(&self) -> bool {
        self.unlocked || self.revealed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// One entry per day, ascending.
    pub tiles: Vec<TileViewState>,
    /// Keep as `previous` for the next pass.
    pub unlocked: UnlockedSet,
}

impl Reconciliation {
    #[must_use]
    pub fn just_unlocked(&self) -> Vec<Day> {
        self.tiles
            .iter()
            .filter(|tile| tile.just_unlocked)
            .map(|tile| tile.day)
            .collect()
    }
}

impl UnlockSchedule {
    #[must_use]
    pub fn reconcile(
        &self,
        now: NaiveDateTime,
        previous: &UnlockedSet,
        revealed: &RevealedSet,
    ) -> Reconciliation {
        let unlocked = self.unlocked_days(now);
        let tiles = Day::all()
            .map(|day| {
                let is_unlocked = unlocked.contains(day);
                TileViewState {
                    day,
                    unlocked: is_unlocked,
                    revealed: revealed.contains(day),
                    just_unlocked: is_unlocked && !previous.contains(day),
                }
            })
            .collect();
        Reconciliation { tiles, unlocked }
    }
}

/// [`UnlockSchedule::reconcile`] with the default schedule.
#[must_use]
pub fn reconcile(
    now: NaiveDateTime,
    previous: &UnlockedSet,
    revealed: &RevealedSet,
) -> Reconciliation {
    UnlockSchedule::default().reconcile(now, previous, revealed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revealed::mark_done;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn flags_only_the_newly_unlocked_day() {
        let previous: UnlockedSet = (1..=5).map(day).collect();
        let result = reconcile(at(2025, 12, 6, 7), &previous, &RevealedSet::new());
        assert_eq!(result.just_unlocked(), vec![day(6)]);
        assert_eq!(result.unlocked.len(), 6);
        for tile in &result.tiles[..5] {
            assert!(tile.unlocked && !tile.just_unlocked);
        }
        assert!(result.tiles[5].just_unlocked);
        assert!(!result.tiles[6].unlocked);
    }

    #[test]
    fn tiles_cover_every_day_in_order() {
        let result = reconcile(at(2025, 12, 1, 0), &UnlockedSet::default(), &RevealedSet::new());
        let days: Vec<u8> = result.tiles.iter().map(|t| t.day.get()).collect();
        assert_eq!(days, (1..=24).collect::<Vec<u8>>());
        assert!(result.unlocked.is_empty());
    }

    #[test]
    fn revealed_locked_tile_remains_openable() {
        let revealed = mark_done(day(20), RevealedSet::new());
        let result = reconcile(at(2026, 1, 2, 12), &UnlockedSet::default(), &revealed);
        let tile = result.tiles[19];
        assert!(!tile.unlocked);
        assert!(tile.revealed);
        assert!(tile.can_open());
        assert!(!result.tiles[18].can_open());
    }

    #[test]
    fn rewinding_time_never_flags_transitions() {
        let previous: UnlockedSet = (1..=10).map(day).collect();
        let result = reconcile(at(2025, 12, 3, 12), &previous, &RevealedSet::new());
        assert!(result.just_unlocked().is_empty());
        assert_eq!(result.unlocked.len(), 3);
    }
}
