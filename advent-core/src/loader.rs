//! Content loading capability.
//!
//! Sources fetch a JSON document by logical name; the transport is the
//! implementor's business. [`FallbackSource`] chains a primary and a
//! secondary transport for the same document.

use crate::content::{ContentError, ContentTable, accept_content, parse_document};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("document {0} not found")]
    NotFound(String),
    #[error("document {name} returned status {status}")]
    Status { name: String, status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
}

/// Fetch a JSON document by logical name.
#[async_trait(?Send)]
pub trait DocumentSource {
    /// # Errors
    ///
    /// Returns an error if the document cannot be retrieved.
    async fn fetch_document(&self, name: &str) -> Result<String, SourceError>;
}

/// Tries `primary`, then `secondary` if the primary transport fails.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackSource<P, S> {
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait(?Send)]
impl<P, S> DocumentSource for FallbackSource<P, S>
where
    P: DocumentSource,
    S: DocumentSource,
{
    async fn fetch_document(&self, name: &str) -> Result<String, SourceError> {
        match self.primary.fetch_document(name).await {
            Ok(text) => Ok(text),
            Err(err) => {
                log::debug!("primary source failed for {name}: {err}; trying fallback");
                self.secondary.fetch_document(name).await
            }
        }
    }
}

/// Documents held in memory, keyed by logical name.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, name: &str, body: impl Into<String>) -> Self {
        self.documents.insert(name.to_string(), body.into());
        self
    }
}

#[async_trait(?Send)]
impl DocumentSource for StaticSource {
    async fn fetch_document(&self, name: &str) -> Result<String, SourceError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }
}

/// Result of one load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ContentTable),
    /// The document parsed but did not pass the acceptance gate.
    Rejected { entries: usize },
    Failed(ContentError),
}

impl LoadOutcome {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Status this outcome leaves behind once applied.
    #[must_use]
    pub const fn status(&self) -> ContentStatus {
        match self {
            Self::Loaded(_) => ContentStatus::Loaded,
            Self::Rejected { .. } => ContentStatus::Unavailable(UnavailableReason::Invalid),
            Self::Failed(_) => ContentStatus::Unavailable(UnavailableReason::NotLoaded),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnavailableReason {
    NotLoaded,
    Invalid,
}

/// Observable content state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentStatus {
    Loading,
    Loaded,
    Unavailable(UnavailableReason),
}

impl ContentStatus {
    /// Status line shown next to the reload control.
    #[must_use]
    pub fn describe(&self, document: &str) -> String {
        let state = match self {
            Self::Loading => "loading...",
            Self::Loaded => "loaded",
            Self::Unavailable(UnavailableReason::Invalid) => "invalid",
            Self::Unavailable(UnavailableReason::NotLoaded) => "not loaded",
        };
        format!("{document}: {state}")
    }
}

/// Fetch, parse and gate one document.
pub async fn load_content<S>(source: &S, name: &str) -> LoadOutcome
where
    S: DocumentSource + ?Sized,
{
    let text = match source.fetch_document(name).await {
        Ok(text) => text,
        Err(err) => {
            log::info!("{name} not loaded: {err}");
            return LoadOutcome::Failed(err.into());
        }
    };
    let records = match parse_document(&text) {
        Ok(records) => records,
        Err(ContentError::NotAnArray) => {
            log::info!("{name} rejected: not an array");
            return LoadOutcome::Rejected { entries: 0 };
        }
        Err(err) => {
            log::info!("{name} not loaded: {err}");
            return LoadOutcome::Failed(err);
        }
    };
    accept_content(&records).map_or_else(
        || {
            log::info!("{name} rejected: {} entries", records.len());
            LoadOutcome::Rejected {
                entries: records.len(),
            }
        },
        LoadOutcome::Loaded,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::Day;
    use std::cell::Cell;

    struct FailingSource<'a> {
        calls: &'a Cell<u32>,
    }

    #[async_trait(?Send)]
    impl DocumentSource for FailingSource<'_> {
        async fn fetch_document(&self, name: &str) -> Result<String, SourceError> {
            self.calls.set(self.calls.get() + 1);
            Err(SourceError::Transport(format!("{name} unreachable")))
        }
    }

    fn document(count: u8) -> String {
        let entries: Vec<String> = (1..=count)
            .map(|n| format!(r#"{{"day": {n}, "question": "Q{n}"}}"#))
            .collect();
        format!("[{}]", entries.join(","))
    }

    #[tokio::test]
    async fn fallback_is_used_only_when_primary_fails() {
        let calls = Cell::new(0);
        let source = FallbackSource::new(
            FailingSource { calls: &calls },
            StaticSource::new().with_document("questions.json", document(24)),
        );
        let outcome = load_content(&source, "questions.json").await;
        assert_eq!(calls.get(), 1);
        let LoadOutcome::Loaded(table) = outcome else {
            panic!("expected loaded content");
        };
        assert_eq!(table.question(Day::LAST), Some("Q24"));

        let primary_ok = FallbackSource::new(
            StaticSource::new().with_document("questions.json", document(24)),
            FailingSource { calls: &calls },
        );
        assert!(load_content(&primary_ok, "questions.json").await.is_loaded());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn both_transports_failing_reports_failure() {
        let calls = Cell::new(0);
        let source = FallbackSource::new(
            FailingSource { calls: &calls },
            FailingSource { calls: &calls },
        );
        let outcome = load_content(&source, "questions.json").await;
        assert_eq!(calls.get(), 2);
        assert!(matches!(
            outcome,
            LoadOutcome::Failed(ContentError::Source(SourceError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn short_and_shapeless_documents_are_rejected() {
        let source = StaticSource::new()
            .with_document("short.json", document(23))
            .with_document("object.json", r#"{"days": []}"#)
            .with_document("broken.json", "[{");
        assert!(matches!(
            load_content(&source, "short.json").await,
            LoadOutcome::Rejected { entries: 23 }
        ));
        assert!(matches!(
            load_content(&source, "object.json").await,
            LoadOutcome::Rejected { entries: 0 }
        ));
        assert!(matches!(
            load_content(&source, "broken.json").await,
            LoadOutcome::Failed(ContentError::Json(_))
        ));
        assert!(matches!(
            load_content(&source, "missing.json").await,
            LoadOutcome::Failed(ContentError::Source(SourceError::NotFound(_)))
        ));
    }

    #[test]
    fn status_lines_name_the_document() {
        assert_eq!(
            ContentStatus::Loaded.describe("questions.json"),
            "questions.json: loaded"
        );
        assert_eq!(
            ContentStatus::Unavailable(UnavailableReason::Invalid).describe("q.json"),
            "q.json: invalid"
        );
        assert_eq!(
            ContentStatus::Unavailable(UnavailableReason::NotLoaded).describe("q.json"),
            "q.json: not loaded"
        );
        assert_eq!(ContentStatus::Loading.describe("q.json"), "q.json: loading...");
    }
}
