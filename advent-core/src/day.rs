use crate::constants::DAY_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DayError {
    #[error("day {0} is outside the calendar range 1..=24")]
    OutOfRange(i64),
}

/// A calendar tile identifier, always within `1..=DAY_COUNT`.
///
/// Serializes as a bare integer so persisted state stays a plain JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Day(u8);

impl Day {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(DAY_COUNT);

    /// Build a day from its number.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::OutOfRange`] when `number` is 0 or above the last day.
    pub const fn new(number: u8) -> Result<Self, DayError> {
        if number >= 1 && number <= DAY_COUNT {
            Ok(Self(number))
        } else {
            Err(DayError::OutOfRange(number as i64))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot index (`day - 1`).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index + 1).ok().and_then(|n| Self::new(n).ok())
    }

    /// Every day in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (1..=DAY_COUNT).map(Self)
    }
}

impl TryFrom<i64> for Day {
    type Error = DayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(|n| Self::new(n).ok())
            .ok_or(DayError::OutOfRange(value))
    }
}

impl TryFrom<u8> for Day {
    type Error = DayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_numbers() {
        assert_eq!(Day::new(0), Err(DayError::OutOfRange(0)));
        assert_eq!(Day::new(25), Err(DayError::OutOfRange(25)));
        assert_eq!(Day::try_from(-3_i64), Err(DayError::OutOfRange(-3)));
        assert_eq!(Day::try_from(300_i64), Err(DayError::OutOfRange(300)));
        assert_eq!(Day::new(24).map(Day::get), Ok(24));
    }

    #[test]
    fn all_days_are_ascending_and_complete() {
        let days: Vec<u8> = Day::all().map(Day::get).collect();
        assert_eq!(days.len(), usize::from(DAY_COUNT));
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&24));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn index_round_trips_through_slots() {
        for day in Day::all() {
            assert_eq!(Day::from_index(day.index()), Some(day));
        }
        assert_eq!(Day::from_index(24), None);
    }

    #[test]
    fn serde_rejects_invalid_days() {
        assert_eq!(serde_json::to_string(&Day::LAST).unwrap(), "24");
        assert_eq!(serde_json::from_str::<Day>("7").unwrap().get(), 7);
        assert!(serde_json::from_str::<Day>("0").is_err());
        assert!(serde_json::from_str::<Day>("99").is_err());
    }
}
