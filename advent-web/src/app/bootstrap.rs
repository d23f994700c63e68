use crate::app::state::AppState;
use advent_core::{ContentStatus, LoadOutcome, load_content};
use yew::prelude::*;

/// Kick off a content load. Only the most recently started load is applied.
pub fn spawn_content_load(state: &AppState) {
    let (ticket, document) = {
        let mut calendar = state.calendar.borrow_mut();
        (
            calendar.begin_content_load(),
            calendar.content_document().to_string(),
        )
    };
    state.refresh();

    let state = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let source = crate::loader::browser_source();
        let outcome = load_content(&source, &document).await;
        match &outcome {
            LoadOutcome::Loaded(_) => log::info!("{document} loaded"),
            LoadOutcome::Rejected { entries } => {
                crate::dom::console_warn(&format!(
                    "{document} has {entries} entries; keeping previous questions"
                ));
            }
            LoadOutcome::Failed(err) => {
                crate::dom::console_warn(&format!("{document} unavailable: {err}"));
            }
        }
        let applied = state
            .calendar
            .borrow_mut()
            .finish_content_load(ticket, outcome);
        if applied {
            state.refresh();
        }
    });
}

/// Load content when nothing has been adopted and no load is in flight.
pub fn ensure_content(state: &AppState) {
    let needs_load = {
        let calendar = state.calendar.borrow();
        calendar.content().is_none() && calendar.content_status() != ContentStatus::Loading
    };
    if needs_load {
        spawn_content_load(state);
    }
}

/// Initial content load plus the periodic re-render timer.
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();
    use_effect_with((), move |()| {
        spawn_content_load(&state);
        let period = state.calendar.borrow().refresh_interval();
        let period_ms = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        let tick = state.clone();
        let interval = gloo::timers::callback::Interval::new(period_ms, move || tick.refresh());
        move || drop(interval)
    });
}
