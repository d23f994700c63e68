use advent_core::{Day, UnlockSchedule, is_unlocked, reconcile, unlocked_days};
use advent_core::{RevealedSet, UnlockedSet};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn day(n: u8) -> Day {
    Day::new(n).unwrap()
}

/// Sample instants across several years, concentrated around December.
fn sample_instants() -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    for year in [1999, 2024, 2025, 2026, 2100] {
        for month in [1, 6, 11, 12] {
            for dom in [1, 5, 6, 7, 23, 24, 25, 28] {
                for (h, m, s) in [(0, 0, 0), (5, 59, 59), (6, 0, 0), (6, 0, 1), (23, 59, 59)] {
                    out.push(at(year, month, dom, h, m, s));
                }
            }
        }
    }
    out
}

#[test]
fn unlock_matches_december_six_am_of_evaluated_year() {
    for now in sample_instants() {
        for d in Day::all() {
            let threshold = at(now.year(), 12, u32::from(d.get()), 6, 0, 0);
            assert_eq!(
                is_unlocked(d, now),
                now >= threshold,
                "day {d} at {now} disagrees with {threshold}"
            );
        }
    }
}

#[test]
fn unlocked_set_never_shrinks_within_december() {
    let mut now = at(2025, 12, 1, 0, 0, 0);
    let end = at(2025, 12, 31, 23, 0, 0);
    let mut last = 0;
    while now <= end {
        let count = unlocked_days(now).len();
        assert!(count >= last, "unlocked set shrank at {now}");
        last = count;
        now += Duration::minutes(30);
    }
    assert_eq!(last, 24);
}

#[test]
fn documented_boundary_examples() {
    let six = at(2025, 12, 6, 6, 0, 0);
    let set = unlocked_days(six);
    assert!(set.contains(day(6)));
    assert!(!set.contains(day(7)));
    assert!(!unlocked_days(at(2025, 12, 6, 5, 59, 59)).contains(day(6)));
}

#[test]
fn schedule_and_free_functions_agree_by_default() {
    let schedule = UnlockSchedule::default();
    for now in sample_instants() {
        assert_eq!(schedule.unlocked_days(now), unlocked_days(now));
    }
}

#[test]
fn reconcile_over_a_simulated_week() {
    let revealed = RevealedSet::load(Some("[2, 4]"));
    let mut previous = UnlockedSet::default();
    let mut flagged = Vec::new();
    for dom in 1..=7 {
        let result = reconcile(at(2025, 12, dom, 12, 0, 0), &previous, &revealed);
        flagged.extend(result.just_unlocked());
        assert!(result.tiles[1].revealed);
        assert!(!result.tiles[2].revealed);
        previous = result.unlocked;
    }
    assert_eq!(flagged, (1..=7).map(day).collect::<Vec<_>>());
}
