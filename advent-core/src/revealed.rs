use crate::day::Day;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RevealedParseError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("revealed state is not a JSON array")]
    NotAnArray,
}

/// Days the user has marked done. Grows only, always ascending, never
/// holds a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RevealedSet(Vec<Day>);

impl RevealedSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse the persisted JSON array.
    ///
    /// Entries that are not integers in the calendar range are dropped; the
    /// remaining days are sorted and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not an array.
    pub fn parse(json: &str) -> Result<Self, RevealedParseError> {
        let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
            return Err(RevealedParseError::NotAnArray);
        };
        let mut set = Self::new();
        for item in items {
            match item.as_i64().map(Day::try_from) {
                Some(Ok(day)) => {
                    set.insert(day);
                }
                _ => log::warn!("ignoring invalid revealed entry {item}"),
            }
        }
        Ok(set)
    }

    /// Lenient load: a missing or malformed value becomes the empty set.
    #[must_use]
    pub fn load(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };
        Self::parse(raw).unwrap_or_else(|err| {
            log::warn!("discarding unreadable revealed state: {err}");
            Self::new()
        })
    }

    /// Insert `day` at its sorted position. Returns `false` if it was
    /// already present.
    pub fn insert(&mut self, day: Day) -> bool {
        match self.0.binary_search(&day) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, day);
                true
            }
        }
    }

    #[must_use]
    pub fn contains(&self, day: Day) -> bool {
        self.0.binary_search(&day).is_ok()
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

    #[must_use]
    pub fn as_slice(&self) -> &[Day] {
        &self.0
    }

    /// Ascending JSON array of day numbers, the persisted form.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::from(self.0.iter().map(|d| d.get()).collect::<Vec<u8>>()).to_string()
    }
}

impl FromIterator<Day> for RevealedSet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Mark `day` done. Idempotent: marking an already revealed day returns the
/// set unchanged.
#[must_use]
pub fn mark_done(day: Day, mut revealed: RevealedSet) -> RevealedSet {
    revealed.insert(day);
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    fn numbers(set: &RevealedSet) -> Vec<u8> {
        set.iter().map(Day::get).collect()
    }

    #[test]
    fn unsorted_storage_loads_sorted_and_accepts_new_days() {
        let loaded = RevealedSet::load(Some("[3,1,2]"));
        assert_eq!(numbers(&loaded), vec![1, 2, 3]);
        let updated = mark_done(day(4), loaded);
        assert_eq!(numbers(&updated), vec![1, 2, 3, 4]);
        assert_eq!(updated.to_json(), "[1,2,3,4]");
    }

    #[test]
    fn mark_done_is_idempotent() {
        let once = mark_done(day(7), RevealedSet::load(Some("[2,9]")));
        let twice = mark_done(day(7), once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn arbitrary_mark_sequences_stay_strictly_ascending() {
        let sequence = [5, 3, 24, 3, 1, 5, 12, 1, 2];
        let set = sequence
            .iter()
            .fold(RevealedSet::new(), |acc, &n| mark_done(day(n), acc));
        let nums = numbers(&set);
        assert!(nums.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(nums, vec![1, 2, 3, 5, 12, 24]);
    }

    #[test]
    fn malformed_or_missing_state_is_empty() {
        assert!(RevealedSet::load(None).is_empty());
        assert!(RevealedSet::load(Some("not json")).is_empty());
        assert!(RevealedSet::load(Some(r#"{"a":1}"#)).is_empty());
        assert!(RevealedSet::load(Some("")).is_empty());
    }

    #[test]
    fn parse_drops_entries_outside_the_calendar() {
        let set = RevealedSet::parse(r#"[0, 4, "5", 25, 4, 2.5, -1, 24]"#).unwrap();
        assert_eq!(numbers(&set), vec![4, 24]);
        assert!(matches!(
            RevealedSet::parse("{}"),
            Err(RevealedParseError::NotAnArray)
        ));
    }

    #[test]
    fn empty_set_serializes_as_empty_array() {
        assert_eq!(RevealedSet::new().to_json(), "[]");
        assert_eq!(
            serde_json::to_string(&RevealedSet::load(Some("[2,1]"))).unwrap(),
            "[1,2]"
        );
    }
}
