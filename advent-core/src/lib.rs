//! Advent Calendar Core
//!
//! Platform-agnostic logic for a 24-tile advent calendar: the unlock
//! schedule, the persisted "revealed" set, the optional question content and
//! the reconciliation pass that combines them into a per-tile view model.
//! This crate has no UI or platform-specific dependencies; storage and
//! document transport are supplied through [`RevealedStore`] and
//! [`DocumentSource`].

pub mod calendar;
pub mod clock;
pub mod config;
pub mod constants;
pub mod content;
pub mod day;
pub mod loader;
pub mod reconcile;
pub mod revealed;
pub mod schedule;
pub mod store;

// Re-export commonly used types
pub use calendar::{Calendar, CalendarView, LoadTicket};
pub use clock::{
    Clock, ClockError, FixedClock, SystemClock, TimeSource, format_datetime_local,
    parse_datetime_local,
};
pub use config::{CalendarConfig, ConfigError};
pub use constants::DAY_COUNT;
pub use content::{
    ContentError, ContentRecord, ContentTable, DayDetail, Embed, accept_content, merge_content,
    parse_document, placeholder_question, question_text,
};
pub use day::{Day, DayError};
pub use loader::{
    ContentStatus, DocumentSource, FallbackSource, LoadOutcome, SourceError, StaticSource,
    UnavailableReason, load_content,
};
pub use reconcile::{Reconciliation, TileViewState, reconcile};
pub use revealed::{RevealedParseError, RevealedSet, mark_done};
pub use schedule::{UnlockSchedule, UnlockedSet, is_unlocked, unlocked_days};
pub use store::{MemoryStore, RevealedStore, load_revealed, save_revealed};
