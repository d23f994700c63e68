//! Fixed calendar parameters.
//!
//! The day universe and unlock month are part of the calendar's identity and
//! never come from configuration. The remaining values are the defaults used
//! by [`crate::config::CalendarConfig`].

/// Number of tiles on the calendar.
pub const DAY_COUNT: u8 = 24;

/// Month (1-based) in which every tile unlocks.
pub const UNLOCK_MONTH: u32 = 12;

/// Hour of the day (local time) at which a tile unlocks.
pub const DEFAULT_UNLOCK_HOUR: u32 = 6;

/// Storage key holding the JSON array of revealed days.
pub const DEFAULT_STORAGE_KEY: &str = "advent.revealed";

/// Logical name of the optional question document.
pub const DEFAULT_CONTENT_DOCUMENT: &str = "questions.json";

/// Seconds between timer-driven reconciliation passes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 60;

// Logging -----------------------------------------------------------------
#[cfg(debug_assertions)]
pub(crate) const DEBUG_ENV_VAR: &str = "ADVENT_DEBUG_LOGS";

#[cfg(debug_assertions)]
pub(crate) fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
pub(crate) const fn debug_log_enabled() -> bool {
    false
}
