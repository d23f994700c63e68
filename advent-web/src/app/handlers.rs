use crate::app::bootstrap::{ensure_content, spawn_content_load};
use crate::app::state::AppState;
use advent_core::{Clock, Day, SystemClock, TimeSource, format_datetime_local};
use yew::prelude::*;

/// User actions wired to the calendar context.
#[derive(Clone, PartialEq)]
pub struct AppHandlers {
    pub open_day: Callback<Day>,
    pub close_day: Callback<()>,
    pub mark_done: Callback<Day>,
    pub toggle_simulation: Callback<bool>,
    pub edit_simulation: Callback<String>,
    pub reset_simulation: Callback<()>,
    pub reload_content: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            open_day: open_day(state),
            close_day: close_day(state),
            mark_done: mark_done(state),
            toggle_simulation: toggle_simulation(state),
            edit_simulation: edit_simulation(state),
            reset_simulation: reset_simulation(state),
            reload_content: reload_content(state),
        }
    }
}

fn open_day(state: &AppState) -> Callback<Day> {
    let state = state.clone();
    Callback::from(move |day: Day| {
        let openable = state.view.tile(day).is_some_and(|tile| tile.can_open());
        if !openable {
            return;
        }
        ensure_content(&state);
        state.open_day.set(Some(day));
    })
}

fn close_day(state: &AppState) -> Callback<()> {
    let open_day = state.open_day.clone();
    Callback::from(move |()| open_day.set(None))
}

fn mark_done(state: &AppState) -> Callback<Day> {
    let state = state.clone();
    Callback::from(move |day: Day| {
        let result = state.calendar.borrow_mut().mark_done(day);
        if let Err(err) = result {
            log::warn!("could not persist day {day}: {err}");
            crate::dom::console_error(&format!("Failed to save progress: {err}"));
        }
        state.refresh();
        state.open_day.set(None);
    })
}

fn apply_time_source(state: &AppState, source: TimeSource) {
    state.calendar.borrow_mut().set_time_source(source);
    state.refresh();
}

fn toggle_simulation(state: &AppState) -> Callback<bool> {
    let state = state.clone();
    Callback::from(move |enabled: bool| {
        state.sim_enabled.set(enabled);
        let source = if enabled {
            TimeSource::simulated_from_input(&state.sim_input, &SystemClock)
        } else {
            TimeSource::Real
        };
        apply_time_source(&state, source);
    })
}

fn edit_simulation(state: &AppState) -> Callback<String> {
    let state = state.clone();
    Callback::from(move |value: String| {
        if *state.sim_enabled {
            apply_time_source(&state, TimeSource::simulated_from_input(&value, &SystemClock));
        }
        state.sim_input.set(value);
    })
}

fn reset_simulation(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        state.sim_enabled.set(false);
        state.sim_input.set(format_datetime_local(SystemClock.now()));
        apply_time_source(&state, TimeSource::Real);
    })
}

fn reload_content(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| spawn_content_load(&state))
}
