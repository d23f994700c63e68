//! Time sources for reconciliation passes.

use chrono::NaiveDateTime;
use serde::Serialize;

const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";
const DATETIME_LOCAL_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("invalid local date-time: {0:?}")]
    Invalid(String),
}

/// Platform-agnostic wall clock, in local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Which notion of "now" the scheduler sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TimeSource {
    #[default]
    Real,
    Simulated(NaiveDateTime),
}

impl TimeSource {
    #[must_use]
    pub fn resolve<C: Clock + ?Sized>(&self, clock: &C) -> NaiveDateTime {
        match self {
            Self::Real => clock.now(),
            Self::Simulated(instant) => *instant,
        }
    }

    #[must_use]
    pub const fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }

    /// Simulated source from a toolbar input. Empty or unparsable input
    /// falls back to the clock's current time.
    #[must_use]
    pub fn simulated_from_input<C: Clock + ?Sized>(input: &str, clock: &C) -> Self {
        let instant = parse_datetime_local(input).unwrap_or_else(|err| {
            if !input.trim().is_empty() {
                log::debug!("simulation input rejected: {err}");
            }
            clock.now()
        });
        Self::Simulated(instant)
    }
}

/// Parse an HTML `datetime-local` value (`YYYY-MM-DDTHH:MM`, optional seconds).
///
/// # Errors
///
/// Returns [`ClockError::Invalid`] if the value matches neither form.
pub fn parse_datetime_local(input: &str) -> Result<NaiveDateTime, ClockError> {
    let trimmed = input.trim();
    NaiveDateTime::parse_from_str(trimmed, DATETIME_LOCAL_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DATETIME_LOCAL))
        .map_err(|_| ClockError::Invalid(input.to_string()))
}

/// Format for an HTML `datetime-local` input, minute precision.
#[must_use]
pub fn format_datetime_local(instant: NaiveDateTime) -> String {
    instant.format(DATETIME_LOCAL).to_string()
}
