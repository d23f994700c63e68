use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub revealed: usize,
    pub total: usize,
}

#[function_component(ProgressMeter)]
pub fn progress_meter(props: &Props) -> Html {
    html! {
        <p class="progress" aria-live="polite">
            <span id="progressCount">{ props.revealed.to_string() }</span>
            { format!(" / {} revealed", props.total) }
        </p>
    }
}
