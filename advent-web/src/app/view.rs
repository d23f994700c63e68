use crate::app::handlers::AppHandlers;
use crate::app::state::AppState;
use crate::components::{CalendarGrid, DayDialog, DevToolbar, ProgressMeter};
use advent_core::DAY_COUNT;
use yew::prelude::*;

pub fn render_app(state: &AppState, handlers: &AppHandlers) -> Html {
    let view = &*state.view;
    let detail = (*state.open_day).and_then(|day| state.calendar.borrow().open_day(day, view.now));
    let status_line = view
        .content_status
        .describe(state.calendar.borrow().content_document());

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <header class="app-header">
                <h1>{ "Advent Calendar" }</h1>
                <ProgressMeter revealed={view.progress} total={usize::from(DAY_COUNT)} />
            </header>
            <div id="calendar-status" class="sr-only" aria-live="polite"></div>
            <main id="main" role="main">
                <CalendarGrid tiles={view.tiles.clone()} on_open={handlers.open_day.clone()} />
            </main>
            <DayDialog
                detail={detail}
                on_close={handlers.close_day.clone()}
                on_mark_done={handlers.mark_done.clone()}
            />
            <DevToolbar
                simulating={*state.sim_enabled}
                sim_value={AttrValue::from((*state.sim_input).clone())}
                content_status={AttrValue::from(status_line)}
                on_toggle={handlers.toggle_simulation.clone()}
                on_edit={handlers.edit_simulation.clone()}
                on_reset={handlers.reset_simulation.clone()}
                on_reload={handlers.reload_content.clone()}
            />
        </>
    }
}
