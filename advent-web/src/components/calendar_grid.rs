use crate::components::tile::Tile;
use advent_core::{Day, TileViewState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub tiles: Vec<TileViewState>,
    pub on_open: Callback<Day>,
}

#[function_component(CalendarGrid)]
pub fn calendar_grid(props: &Props) -> Html {
    html! {
        <section id="calendar" class="calendar" aria-label="Advent calendar">
            { for props.tiles.iter().map(|state| html! {
                <Tile key={state.day.get()} state={*state} on_open={props.on_open.clone()} />
            }) }
        </section>
    }
}
