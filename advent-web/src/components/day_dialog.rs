use crate::components::modal::Modal;
use crate::components::tile::tile_id;
use advent_core::{Day, DayDetail, Embed};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// `None` keeps the dialog closed.
    pub detail: Option<DayDetail>,
    pub on_close: Callback<()>,
    pub on_mark_done: Callback<Day>,
}

fn render_embed(embed: &Embed) -> Html {
    match embed {
        Embed::None => Html::default(),
        Embed::Html(markup) => html! {
            <div class="embed" aria-hidden="false">
                { Html::from_html_unchecked(AttrValue::from(markup.clone())) }
            </div>
        },
        Embed::Link(href) => html! {
            <div class="embed" aria-hidden="false">
                <p class="extra-link">
                    <a href={href.clone()} target="_blank" rel="noopener noreferrer">
                        { "Additional content" }
                    </a>
                </p>
            </div>
        },
    }
}

/// Day whose tile should get focus back: the open one, or the one that was
/// open last once the dialog has closed.
pub fn remember_day(last: &mut Option<Day>, detail: Option<&DayDetail>) -> Option<Day> {
    if let Some(detail) = detail {
        *last = Some(detail.day);
    }
    *last
}

#[function_component(DayDialog)]
pub fn day_dialog(props: &Props) -> Html {
    let last_day = use_mut_ref(|| None::<Day>);
    let return_focus_id = remember_day(&mut last_day.borrow_mut(), props.detail.as_ref())
        .map(|day| AttrValue::from(tile_id(day)));

    let Some(detail) = props.detail.clone() else {
        return html! {
            <Modal open={false} title="" on_close={props.on_close.clone()} {return_focus_id} />
        };
    };

    let on_action = {
        let on_close = props.on_close.clone();
        let on_mark_done = props.on_mark_done.clone();
        let day = detail.day;
        let already_revealed = detail.already_revealed;
        Callback::from(move |_| {
            if already_revealed {
                on_close.emit(());
            } else {
                on_mark_done.emit(day);
            }
        })
    };

    html! {
        <Modal
            open={true}
            title={detail.title.clone()}
            on_close={props.on_close.clone()}
            {return_focus_id}
        >
            <p id="modalQuestion" class="question">{ detail.question.clone() }</p>
            { detail.image.as_ref().map(|src| html! {
                <img class="day-image" src={src.clone()} alt={detail.alt.clone()} />
            }).unwrap_or_default() }
            { render_embed(&detail.embed) }
            <div class="modal__actions">
                <button type="button" id="markDone" class="btn" onclick={on_action}>
                    { detail.action_label() }
                </button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(n: u8) -> DayDetail {
        DayDetail::build(None, Day::new(n).unwrap(), false)
    }

    #[test]
    fn closed_dialog_still_points_at_last_opened_tile() {
        let mut last = None;
        assert_eq!(remember_day(&mut last, None), None);
        let opened = remember_day(&mut last, Some(&detail(7)));
        assert_eq!(opened.map(tile_id).as_deref(), Some("day-7"));
        let closed = remember_day(&mut last, None);
        assert_eq!(closed.map(tile_id).as_deref(), Some("day-7"));
        assert_eq!(remember_day(&mut last, Some(&detail(3))), Day::new(3).ok());
    }
}
