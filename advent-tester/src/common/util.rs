use advent_core::{CalendarConfig, Day, parse_datetime_local};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]` or a bare `YYYY-MM-DD` (midnight).
pub fn parse_instant(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if let Ok(instant) = parse_datetime_local(input) {
        return Ok(instant);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .with_context(|| format!("invalid instant {input:?}; expected YYYY-MM-DDTHH:MM"))
}

pub fn parse_day_list(input: &str) -> Result<Vec<Day>> {
    split_csv(input)
        .iter()
        .map(|token| {
            let n: i64 = token
                .parse()
                .with_context(|| format!("invalid day {token:?}"))?;
            Day::try_from(n).with_context(|| format!("day {n} outside 1..=24"))
        })
        .collect()
}

/// Read a `CalendarConfig`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CalendarConfig> {
    let Some(path) = path else {
        return Ok(CalendarConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    CalendarConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}
