//! Validate a question document the same way the calendar loads it.

use advent_core::{ContentTable, Day, DocumentSource, LoadOutcome, load_content};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ContentReport {
    pub document: String,
    /// Status line as the calendar would show it.
    pub status: String,
    pub accepted: bool,
    /// Entry count of a rejected document.
    pub rejected_entries: Option<usize>,
    pub filled_slots: usize,
    /// Slots holding a record that claims another day (positional fill).
    pub misplaced_days: Vec<Day>,
    /// Days that will show the placeholder question.
    pub placeholder_days: Vec<Day>,
    pub error: Option<String>,
}

impl ContentReport {
    fn from_table(document: &str, status: String, table: &ContentTable) -> Self {
        Self {
            document: document.to_string(),
            status,
            accepted: true,
            rejected_entries: None,
            filled_slots: table.filled_slots(),
            misplaced_days: table.misplaced_days(),
            placeholder_days: Day::all().filter(|&d| table.question(d).is_none()).collect(),
            error: None,
        }
    }

    fn unavailable(document: &str, status: String) -> Self {
        Self {
            document: document.to_string(),
            status,
            accepted: false,
            rejected_entries: None,
            filled_slots: 0,
            misplaced_days: Vec::new(),
            placeholder_days: Day::all().collect(),
            error: None,
        }
    }
}

pub async fn check_content<S>(source: &S, document: &str) -> ContentReport
where
    S: DocumentSource + ?Sized,
{
    let outcome = load_content(source, document).await;
    let status = outcome.status().describe(document);
    match outcome {
        LoadOutcome::Loaded(table) => ContentReport::from_table(document, status, &table),
        LoadOutcome::Rejected { entries } => ContentReport {
            rejected_entries: Some(entries),
            error: Some(format!(
                "{entries} entries; at least {} required",
                advent_core::DAY_COUNT
            )),
            ..ContentReport::unavailable(document, status)
        },
        LoadOutcome::Failed(err) => ContentReport {
            error: Some(err.to_string()),
            ..ContentReport::unavailable(document, status)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_core::StaticSource;
    use serde_json::json;

    const DOC: &str = "questions.json";

    fn check(body: Option<String>) -> ContentReport {
        let source = body.map_or_else(StaticSource::new, |b| {
            StaticSource::new().with_document(DOC, b)
        });
        tokio_test::block_on(check_content(&source, DOC))
    }

    #[test]
    fn full_document_is_accepted() {
        let body = json!((1..=24)
            .map(|n| json!({ "day": n, "question": format!("q{n}") }))
            .collect::<Vec<_>>());
        let report = check(Some(body.to_string()));
        assert!(report.accepted);
        assert_eq!(report.status, "questions.json: loaded");
        assert_eq!(report.filled_slots, 24);
        assert!(report.misplaced_days.is_empty());
        assert!(report.placeholder_days.is_empty());
    }

    #[test]
    fn blank_questions_and_misfiled_days_are_reported() {
        let mut entries: Vec<_> = (1..=24)
            .map(|n| json!({ "day": n, "question": format!("q{n}") }))
            .collect();
        entries[3] = json!({ "day": 0, "question": "" });
        let report = check(Some(json!(entries).to_string()));
        assert!(report.accepted);
        assert_eq!(report.misplaced_days, vec![Day::new(4).unwrap()]);
        assert_eq!(report.placeholder_days, vec![Day::new(4).unwrap()]);
    }

    #[test]
    fn short_document_is_invalid() {
        let report = check(Some("[{}, {}]".to_string()));
        assert!(!report.accepted);
        assert_eq!(report.status, "questions.json: invalid");
        assert_eq!(report.rejected_entries, Some(2));
        assert_eq!(report.placeholder_days.len(), 24);
    }

    #[test]
    fn missing_document_is_not_loaded() {
        let report = check(None);
        assert!(!report.accepted);
        assert_eq!(report.status, "questions.json: not loaded");
        assert!(report.error.is_some());
    }
}
