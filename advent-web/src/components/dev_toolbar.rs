use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub simulating: bool,
    /// `datetime-local` value shown in the picker.
    pub sim_value: AttrValue,
    /// e.g. "questions.json: loaded".
    pub content_status: AttrValue,
    pub on_toggle: Callback<bool>,
    pub on_edit: Callback<String>,
    pub on_reset: Callback<()>,
    pub on_reload: Callback<()>,
}

#[function_component(DevToolbar)]
pub fn dev_toolbar(props: &Props) -> Html {
    let on_toggle = {
        let cb = props.on_toggle.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.checked());
        })
    };
    let on_edit = {
        let cb = props.on_edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    let on_reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_reload = {
        let cb = props.on_reload.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <aside class="dev-toolbar" aria-label="Developer tools">
            <label for="simToggle">
                <input
                    id="simToggle"
                    type="checkbox"
                    checked={props.simulating}
                    onchange={on_toggle}
                />
                { " Simulate date" }
            </label>
            <input
                id="simDate"
                type="datetime-local"
                value={props.sim_value.clone()}
                onchange={on_edit}
            />
            <button type="button" id="simReset" class="btn" onclick={on_reset}>{ "Reset" }</button>
            <span id="qStatus" class="content-status">{ props.content_status.clone() }</span>
            <button type="button" id="reloadQuestions" class="btn" onclick={on_reload}>
                { "Reload questions" }
            </button>
        </aside>
    }
}
