use crate::storage::LocalRevealedStore;
use advent_core::{
    Calendar, CalendarConfig, CalendarView, Clock, Day, SystemClock, format_datetime_local,
};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub type WebCalendar = Calendar<LocalRevealedStore>;

#[derive(Clone)]
pub struct AppState {
    /// Long-lived calendar context; never borrowed across an `.await`.
    pub calendar: Rc<RefCell<WebCalendar>>,
    pub view: UseStateHandle<CalendarView>,
    pub open_day: UseStateHandle<Option<Day>>,
    pub sim_enabled: UseStateHandle<bool>,
    pub sim_input: UseStateHandle<String>,
}

#[hook]
pub fn use_app_state() -> AppState {
    let calendar = use_mut_ref(|| {
        Calendar::new(
            LocalRevealedStore,
            &CalendarConfig::default(),
            SystemClock.now(),
        )
    });
    let view = {
        let calendar = calendar.clone();
        use_state(move || run_pass(&calendar))
    };
    AppState {
        calendar,
        view,
        open_day: use_state(|| None::<Day>),
        sim_enabled: use_state(|| false),
        sim_input: use_state(|| format_datetime_local(SystemClock.now())),
    }
}

fn run_pass(calendar: &RefCell<WebCalendar>) -> CalendarView {
    let mut calendar = calendar.borrow_mut();
    let now = calendar.now(&SystemClock);
    calendar.pass(now)
}

impl AppState {
    /// Run a reconciliation pass and publish the result.
    pub fn refresh(&self) {
        let view = run_pass(&self.calendar);
        let fresh = view.just_unlocked();
        if !fresh.is_empty() {
            let days: Vec<String> = fresh.iter().map(ToString::to_string).collect();
            crate::a11y::set_status(&format!("Unlocked: day {}", days.join(", ")));
        }
        self.view.set(view);
    }
}
