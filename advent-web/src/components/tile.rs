use advent_core::{Day, TileViewState};
use yew::prelude::*;

/// How long the unlock cue stays on a tile.
pub const UNLOCK_CUE_MS: u32 = 900;

/// Hover scale shared by every tile.
pub const HOVER_SCALE: f64 = 1.04;

fn pseudo_rand(n: f64) -> f64 {
    (n.sin() * 43_758.545_3).abs() % 1.0
}

/// Per-tile visual jitter: `(scale, rotation_deg)`, stable across renders.
///
/// Scale stays within `[0.98, 1.02]` and rotation within `[-4, 4]` degrees.
#[must_use]
pub fn tile_jitter(day: Day) -> (f64, f64) {
    let i = f64::from(day.get());
    let scale = 0.04f64.mul_add(pseudo_rand(i * 13.7), 0.98);
    let rotation = pseudo_rand(i.mul_add(7.3, 1.3)).mul_add(8.0, -4.0);
    (scale, rotation)
}

#[must_use]
pub fn tile_style(day: Day) -> String {
    let (scale, rotation) = tile_jitter(day);
    format!("--s:{scale:.3};--hs:{HOVER_SCALE:.3};--r:{rotation:.2}deg")
}

#[derive(Properties, PartialEq, Clone)]
pub struct TileProps {
    pub state: TileViewState,
    pub on_open: Callback<Day>,
}

/// DOM id of a day's tile; the dialog hands focus back to it on close.
#[must_use]
pub fn tile_id(day: Day) -> String {
    format!("day-{day}")
}

#[function_component(Tile)]
pub fn tile(props: &TileProps) -> Html {
    let state = props.state;
    let animating = use_state_eq(|| state.just_unlocked);
    {
        let animating = animating.clone();
        use_effect_with(state.just_unlocked, move |just_unlocked| {
            let timeout = just_unlocked.then(|| {
                animating.set(true);
                let animating = animating.clone();
                gloo::timers::callback::Timeout::new(UNLOCK_CUE_MS, move || animating.set(false))
            });
            move || {
                drop(timeout);
                animating.set(false);
            }
        });
    }

    let onclick = {
        let on_open = props.on_open.clone();
        Callback::from(move |_| {
            if state.can_open() {
                on_open.emit(state.day);
            }
        })
    };

    let class = classes!(
        "tile",
        (!state.unlocked).then_some("locked"),
        state.revealed.then_some("revealed"),
        (*animating && state.unlocked).then_some("just-unlocked"),
    );
    let day = state.day;

    html! {
        <button
            type="button"
            id={tile_id(day)}
            {class}
            data-day={day.to_string()}
            aria-label={format!("Day {day}")}
            aria-disabled={(!state.can_open()).to_string()}
            style={tile_style(day)}
            {onclick}
        >
            <span class="number">{ day.get().to_string() }</span>
            <span class="ornament"></span>
        </button>
    }
}
