use anyhow::{Context, Result, ensure};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::common::scenario::{LogicScenario, ScenarioCtx};
use advent_core::{
    Calendar, ContentRecord, Day, LoadOutcome, MemoryStore, RevealedSet, UnlockedSet,
    accept_content, mark_done, parse_document,
};

pub fn catalog_scenarios() -> Vec<LogicScenario> {
    vec![
        LogicScenario::new(
            "unlock-boundary",
            "Day N opens exactly at the unlock hour on December N",
            unlock_boundary_expectation,
        ),
        LogicScenario::new(
            "day-one-parity",
            "Days 1 and 24 follow the same rule as every other day",
            day_one_parity_expectation,
        ),
        LogicScenario::new(
            "pre-december",
            "Nothing is unlocked outside December",
            pre_december_expectation,
        ),
        LogicScenario::new(
            "year-rollover",
            "New Year relocks every tile but revealed days stay openable",
            year_rollover_expectation,
        ),
        LogicScenario::new(
            "mark-done-idempotent",
            "Marking a day twice equals marking it once",
            mark_done_idempotent_expectation,
        ),
        LogicScenario::new(
            "revealed-sort",
            "The revealed set stays strictly ascending",
            revealed_sort_expectation,
        ),
        LogicScenario::new(
            "malformed-storage",
            "Corrupt persisted state loads as an empty set",
            malformed_storage_expectation,
        ),
        LogicScenario::new(
            "transition-detection",
            "Only days that crossed their unlock instant are flagged",
            transition_detection_expectation,
        ),
        LogicScenario::new(
            "startup-quiet",
            "The first pass after startup flags nothing",
            startup_quiet_expectation,
        ),
        LogicScenario::new(
            "content-accept",
            "A 24-entry document fills every slot",
            content_accept_expectation,
        ),
        LogicScenario::new(
            "content-reject",
            "A short document leaves the previous questions in place",
            content_reject_expectation,
        ),
        LogicScenario::new(
            "content-positional-fallback",
            "An out-of-range day fills its input position's slot",
            content_positional_fallback_expectation,
        ),
        LogicScenario::new(
            "stale-reload-fenced",
            "A load finishing after a newer one is dropped",
            stale_reload_fenced_expectation,
        ),
    ]
}

pub fn get_scenario(key: &str) -> Option<LogicScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key() == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .iter()
        .map(|scenario| (scenario.key(), scenario.description()))
        .collect()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .with_context(|| format!("invalid date {y}-{m}-{d} {h}:{min}:{s}"))
}

fn day(n: u8) -> Result<Day> {
    Ok(Day::new(n)?)
}

fn days(range: std::ops::RangeInclusive<u8>) -> Result<Vec<Day>> {
    range.map(day).collect()
}

fn questions(count: u8, prefix: &str) -> Vec<ContentRecord> {
    (1..=count)
        .map(|n| ContentRecord {
            day: Some(i64::from(n)),
            question: Some(format!("{prefix} {n}")),
            ..ContentRecord::default()
        })
        .collect()
}

fn unlock_boundary_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let schedule = ctx.schedule();
    let hour = schedule.unlock_hour();
    let d6 = day(6)?;
    let before = at(2025, 12, 6, hour, 0, 0)? - chrono::Duration::seconds(1);
    let exact = at(2025, 12, 6, hour, 0, 0)?;
    ensure!(!schedule.is_unlocked(d6, before), "day 6 unlocked at {before}");
    ensure!(schedule.is_unlocked(d6, exact), "day 6 still locked at {exact}");
    ensure!(
        !schedule.is_unlocked(day(7)?, exact),
        "day 7 unlocked early at {exact}"
    );
    Ok(())
}

fn day_one_parity_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let schedule = ctx.schedule();
    for n in [1, 24] {
        let d = day(n)?;
        let instant = schedule
            .unlock_instant(d, 2025)
            .with_context(|| format!("no unlock instant for day {d}"))?;
        ensure!(
            instant.day() == u32::from(n) && instant.month() == 12,
            "day {d} unlocks on {instant}"
        );
        ensure!(
            !schedule.is_unlocked(d, instant - chrono::Duration::seconds(1)),
            "day {d} open before {instant}"
        );
        ensure!(schedule.is_unlocked(d, instant), "day {d} shut at {instant}");
    }
    Ok(())
}

fn pre_december_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let schedule = ctx.schedule();
    for instant in [at(2025, 11, 30, 23, 59, 59)?, at(2025, 7, 4, 12, 0, 0)?, at(2026, 1, 1, 0, 0, 0)?] {
        let unlocked = schedule.unlocked_days(instant);
        ensure!(unlocked.is_empty(), "{} days unlocked at {instant}", unlocked.len());
    }
    Ok(())
}

fn year_rollover_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let store = MemoryStore::new().with_value(&ctx.config.storage_key, "[24]");
    let eve = at(2025, 12, 31, 23, 59, 0)?;
    let new_year = at(2026, 1, 1, 0, 0, 0)?;
    let mut calendar = Calendar::new(store, &ctx.config, eve);

    ensure!(
        calendar.pass(eve).tiles.iter().all(|t| t.unlocked),
        "not every tile unlocked on New Year's Eve"
    );
    let view = calendar.pass(new_year);
    ensure!(
        view.tiles.iter().all(|t| !t.unlocked),
        "tiles still unlocked on New Year's Day"
    );
    ensure!(
        calendar.open_day(day(24)?, new_year).is_some(),
        "revealed day 24 no longer opens"
    );
    ensure!(
        calendar.open_day(day(23)?, new_year).is_none(),
        "unrevealed day 23 opens while locked"
    );
    Ok(())
}

fn mark_done_idempotent_expectation(_ctx: &ScenarioCtx) -> Result<()> {
    let once = mark_done(day(5)?, RevealedSet::load(Some("[1,9]")));
    let twice = mark_done(day(5)?, once.clone());
    ensure!(once == twice, "second mark changed {once:?} into {twice:?}");
    Ok(())
}

fn revealed_sort_expectation(_ctx: &ScenarioCtx) -> Result<()> {
    let loaded = RevealedSet::load(Some("[3,1,2]"));
    let updated = mark_done(day(4)?, loaded);
    ensure!(
        updated.to_json() == "[1,2,3,4]",
        "expected [1,2,3,4], got {}",
        updated.to_json()
    );

    let mut set = RevealedSet::new();
    for n in [17, 3, 24, 3, 1, 9, 17, 12] {
        set = mark_done(day(n)?, set);
        ensure!(
            set.as_slice().windows(2).all(|pair| pair[0] < pair[1]),
            "set not strictly ascending: {}",
            set.to_json()
        );
    }
    Ok(())
}

fn malformed_storage_expectation(ctx: &ScenarioCtx) -> Result<()> {
    for raw in ["not json", "{\"a\":1}", "[0, 99, \"x\"]"] {
        let store = MemoryStore::new().with_value(&ctx.config.storage_key, raw);
        let calendar = Calendar::new(store, &ctx.config, at(2025, 12, 1, 0, 0, 0)?);
        ensure!(
            calendar.revealed().is_empty(),
            "{raw:?} loaded as {}",
            calendar.revealed().to_json()
        );
    }
    Ok(())
}

fn transition_detection_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let previous: UnlockedSet = days(1..=5)?.into_iter().collect();
    let hour = ctx.schedule().unlock_hour();
    let now = at(2025, 12, 6, hour, 30, 0)?;
    let result = ctx.schedule().reconcile(now, &previous, &RevealedSet::new());
    ensure!(
        result.just_unlocked() == vec![day(6)?],
        "flagged {:?}",
        result.just_unlocked()
    );
    Ok(())
}

fn startup_quiet_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let now = at(2025, 12, 12, 12, 0, 0)?;
    let mut calendar = Calendar::new(MemoryStore::new(), &ctx.config, now);
    let view = calendar.pass(now);
    ensure!(
        view.just_unlocked().is_empty(),
        "startup flagged {:?}",
        view.just_unlocked()
    );
    Ok(())
}

fn content_accept_expectation(_ctx: &ScenarioCtx) -> Result<()> {
    let table = accept_content(&questions(24, "Question"))
        .context("24 records were not accepted")?;
    ensure!(table.filled_slots() == 24, "{} slots filled", table.filled_slots());
    ensure!(
        table.question(day(24)?) == Some("Question 24"),
        "day 24 question mismatch"
    );
    Ok(())
}

fn content_reject_expectation(ctx: &ScenarioCtx) -> Result<()> {
    ensure!(
        accept_content(&questions(23, "Short")).is_none(),
        "23 records were accepted"
    );

    let now = at(2025, 12, 24, 12, 0, 0)?;
    let mut calendar = Calendar::new(MemoryStore::new(), &ctx.config, now);
    let good = accept_content(&questions(24, "Good")).context("good content rejected")?;
    let ticket = calendar.begin_content_load();
    calendar.finish_content_load(ticket, LoadOutcome::Loaded(good));
    let ticket = calendar.begin_content_load();
    calendar.finish_content_load(ticket, LoadOutcome::Rejected { entries: 23 });
    ensure!(
        calendar.question_text(day(24)?) == "Good 24",
        "rejected load replaced questions"
    );
    Ok(())
}

fn content_positional_fallback_expectation(_ctx: &ScenarioCtx) -> Result<()> {
    let document = serde_json::json!([
        { "day": 1, "question": "one" },
        { "day": 2, "question": "two" },
        { "day": 3, "question": "three" },
        { "day": 99, "question": "misfiled" },
    ]);
    let mut records = parse_document(&document.to_string())?;
    records.extend((5..=24).map(|n| ContentRecord {
        day: Some(n),
        question: Some(format!("q{n}")),
        ..ContentRecord::default()
    }));
    let table = accept_content(&records).context("24 records were not accepted")?;
    ensure!(
        table.question(day(4)?) == Some("misfiled"),
        "slot 4 holds {:?}",
        table.question(day(4)?)
    );
    Ok(())
}

fn stale_reload_fenced_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let now = at(2025, 12, 1, 12, 0, 0)?;
    let mut calendar = Calendar::new(MemoryStore::new(), &ctx.config, now);
    let first = calendar.begin_content_load();
    let second = calendar.begin_content_load();
    let newer = accept_content(&questions(24, "Second")).context("content rejected")?;
    let older = accept_content(&questions(24, "First")).context("content rejected")?;

    ensure!(
        calendar.finish_content_load(second, LoadOutcome::Loaded(newer)),
        "latest load was dropped"
    );
    ensure!(
        !calendar.finish_content_load(first, LoadOutcome::Loaded(older)),
        "stale load was applied"
    );
    ensure!(
        calendar.question_text(day(1)?) == "Second 1",
        "stale content visible"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_core::CalendarConfig;

    fn ctx() -> ScenarioCtx {
        ScenarioCtx {
            config: CalendarConfig::default(),
            verbose: false,
        }
    }

    #[test]
    fn every_catalog_scenario_passes_with_defaults() {
        for scenario in catalog_scenarios() {
            if let Err(err) = scenario.run(&ctx()) {
                panic!("{} failed: {err:#}", scenario.key());
            }
        }
    }

    #[test]
    fn catalog_passes_with_a_later_unlock_hour() {
        let mut ctx = ctx();
        ctx.config.unlock_hour = 9;
        for scenario in catalog_scenarios() {
            assert!(scenario.run(&ctx).is_ok(), "{} failed", scenario.key());
        }
    }

    #[test]
    fn keys_are_unique_and_resolvable() {
        let keys: Vec<_> = list_scenarios().into_iter().map(|(key, _)| key).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), keys.len());
        assert!(keys.iter().all(|key| get_scenario(key).is_some()));
        assert!(get_scenario("smoke").is_none());
    }
}
