//! Optional per-day question content and its merge policy.
//!
//! The external document is a JSON array of loosely shaped objects. A load
//! is only adopted when the array has at least one entry per day; anything
//! less leaves the previous content in place.

use crate::constants::DAY_COUNT;
use crate::day::Day;
use crate::loader::SourceError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content source failed: {0}")]
    Source(#[from] SourceError),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("content document is not a JSON array")]
    NotAnArray,
}

/// Wire shape of one document entry. Legacy aliases are kept side by side
/// and folded in [`ContentRecord::from`]. Every field is read on its own, so
/// one mistyped field never costs the record its day.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawContentRecord {
    #[serde(deserialize_with = "deserialize_day_field")]
    day: Option<i64>,
    #[serde(deserialize_with = "deserialize_text_field")]
    question: Option<String>,
    #[serde(deserialize_with = "deserialize_text_field")]
    image: Option<String>,
    #[serde(deserialize_with = "deserialize_text_field")]
    alt: Option<String>,
    #[serde(rename = "embedHtml", deserialize_with = "deserialize_text_field")]
    embed_html: Option<String>,
    #[serde(deserialize_with = "deserialize_text_field")]
    embed: Option<String>,
    #[serde(rename = "extraLink", deserialize_with = "deserialize_text_field")]
    extra_link: Option<String>,
    #[serde(deserialize_with = "deserialize_text_field")]
    link: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Text(String),
    Other(IgnoredAny),
}

/// Strings pass through; any other JSON value reads as absent.
fn deserialize_text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextField>::deserialize(deserializer)? {
        Some(TextField::Text(text)) => Some(text),
        Some(TextField::Other(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DayField {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

#[allow(clippy::cast_possible_truncation)]
fn deserialize_day_field<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<DayField>::deserialize(deserializer)?;
    Ok(match field {
        Some(DayField::Int(n)) => Some(n),
        Some(DayField::Float(f)) if f.is_finite() && f.abs() < 1e15 => Some(f.trunc() as i64),
        Some(DayField::Text(text)) => parse_int_prefix(&text),
        _ => None,
    })
}

/// Leading-integer parse: surrounding whitespace, an optional sign, then as
/// many digits as present. `" 12abc"` reads as 12; `"abc"` reads as nothing.
#[must_use]
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}

/// One normalized content entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    /// Day number as written in the source, possibly out of range.
    pub day: Option<i64>,
    pub question: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    pub embed_html: Option<String>,
    pub extra_link: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<RawContentRecord> for ContentRecord {
    fn from(raw: RawContentRecord) -> Self {
        Self {
            day: raw.day,
            question: raw.question,
            image: raw.image,
            alt: raw.alt,
            embed_html: non_empty(raw.embed_html).or_else(|| non_empty(raw.embed)),
            extra_link: non_empty(raw.extra_link).or_else(|| non_empty(raw.link)),
        }
    }
}

impl ContentRecord {
    /// Lenient conversion of one array element. Non-objects become empty
    /// records; inside an object, mistyped fields are dropped one by one.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value::<RawContentRecord>(value)
            .map(Self::from)
            .unwrap_or_else(|err| {
                log::debug!("content entry unreadable, keeping an empty record: {err}");
                Self::default()
            })
    }

    /// The slot this record claims, if its day is within the calendar.
    #[must_use]
    pub fn slot_day(&self) -> Option<Day> {
        self.day.and_then(|n| Day::try_from(n).ok())
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.question.as_deref().filter(|q| !q.is_empty())
    }
}

/// Parse the external document into records, in source order.
///
/// # Errors
///
/// Returns an error if the text is not JSON or the document is not an array.
pub fn parse_document(json: &str) -> Result<Vec<ContentRecord>, ContentError> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        return Err(ContentError::NotAnArray);
    };
    Ok(items.into_iter().map(ContentRecord::from_value).collect())
}

/// Merged content: one optional record per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTable {
    slots: Vec<Option<ContentRecord>>,
}

impl ContentTable {
    #[must_use]
    pub fn record(&self, day: Day) -> Option<&ContentRecord> {
        self.slots.get(day.index()).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn question(&self, day: Day) -> Option<&str> {
        self.record(day).and_then(ContentRecord::question_text)
    }

    #[must_use]
    pub fn filled_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Days whose slot holds a record claiming a different day (or none).
    #[must_use]
    pub fn misplaced_days(&self) -> Vec<Day> {
        Day::all()
            .filter(|&day| {
                self.record(day)
                    .is_some_and(|record| record.slot_day() != Some(day))
            })
            .collect()
    }

    #[must_use]
    pub fn detail(&self, day: Day, already_revealed: bool) -> DayDetail {
        DayDetail::build(Some(self), day, already_revealed)
    }
}

/// Place records by their `day`, later duplicates overwriting earlier ones,
/// then fill still-empty slots from the same input position.
///
/// The positional fill does not validate anything and can place a record
/// under a day it does not claim.
#[must_use]
pub fn merge_content(records: &[ContentRecord]) -> ContentTable {
    let mut slots: Vec<Option<ContentRecord>> = vec![None; usize::from(DAY_COUNT)];
    for record in records {
        if let Some(day) = record.slot_day() {
            slots[day.index()] = Some(record.clone());
        }
    }
    for (index, slot) in slots.iter_mut().enumerate() {
        if slot.is_none()
            && let Some(record) = records.get(index)
        {
            *slot = Some(record.clone());
        }
    }
    ContentTable { slots }
}

/// The acceptance gate: merge only when the source has an entry per day.
#[must_use]
pub fn accept_content(records: &[ContentRecord]) -> Option<ContentTable> {
    (records.len() >= usize::from(DAY_COUNT)).then(|| merge_content(records))
}

#[must_use]
pub fn placeholder_question(day: Day) -> String {
    format!("Placeholder question for day {day}. Share a favorite memory or story.")
}

/// Question shown for `day`: the loaded question when present and non-empty,
/// the placeholder otherwise.
#[must_use]
pub fn question_text(content: Option<&ContentTable>, day: Day) -> String {
    content
        .and_then(|table| table.question(day))
        .map_or_else(|| placeholder_question(day), str::to_string)
}

/// Supplementary content shown under the question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Embed {
    #[default]
    None,
    /// Raw HTML supplied by the content author, inserted as-is.
    Html(String),
    Link(String),
}

/// Everything the detail dialog needs for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub day: Day,
    pub title: String,
    pub question: String,
    pub image: Option<String>,
    pub alt: String,
    pub embed: Embed,
    pub already_revealed: bool,
}

impl DayDetail {
    #[must_use]
    pub fn build(content: Option<&ContentTable>, day: Day, already_revealed: bool) -> Self {
        let record = content.and_then(|table| table.record(day));
        let (image, alt, embed) = record.map_or_else(
            || (None, String::new(), Embed::None),
            |record| {
                let alt = non_empty(record.alt.clone())
                    .unwrap_or_else(|| format!("Image for day {day}"));
                let embed = match (&record.embed_html, &record.extra_link) {
                    (Some(html), _) => Embed::Html(html.clone()),
                    (None, Some(link)) => Embed::Link(link.clone()),
                    (None, None) => Embed::None,
                };
                (non_empty(record.image.clone()), alt, embed)
            },
        );
        Self {
            day,
            title: format!("Day {day}"),
            question: question_text(content, day),
            image,
            alt,
            embed,
            already_revealed,
        }
    }

    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        if self.already_revealed {
            "Close"
        } else {
            "Mark as done"
        }
    }
}
