use crate::a11y::{cycle_focus, restore_focus, trap_focus_in};
use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

/// Focus work owed after the open flag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    Trap,
    Restore,
    Keep,
}

#[must_use]
pub const fn focus_change(was_open: bool, is_open: bool) -> FocusChange {
    match (was_open, is_open) {
        (_, true) => FocusChange::Trap,
        (true, false) => FocusChange::Restore,
        (false, false) => FocusChange::Keep,
    }
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_id = format!("modal-{}", *modal_id);
    let title_id = format!("modal-title-{}", *modal_id);
    let prev_open = use_mut_ref(|| false);

    {
        let container_id = container_id.clone();
        use_effect_with(
            (props.open, props.return_focus_id.clone()),
            move |(is_open, return_focus_id)| {
                let was_open = *prev_open.borrow();
                *prev_open.borrow_mut() = *is_open;
                match focus_change(was_open, *is_open) {
                    FocusChange::Trap => trap_focus_in(&container_id),
                    FocusChange::Restore => {
                        if let Some(id) = return_focus_id.as_ref() {
                            restore_focus(id);
                        }
                    }
                    FocusChange::Keep => {}
                }
                || {}
            },
        );
    }

    if !props.open {
        return Html::default();
    }

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let cb = props.on_close.clone();
        let container_id = container_id.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Escape" => {
                e.prevent_default();
                cb.emit(());
            }
            "Tab" if cycle_focus(&container_id, e.shift_key()) => e.prevent_default(),
            _ => {}
        })
    };

    html! {
        <div class="modal-backdrop" role="presentation" onclick={on_close.clone()}>
            <div
                id={container_id}
                class="modal open"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                onclick={stop}
                onkeydown={on_keydown}
            >
                <div class="modal__header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    <button type="button" class="modal__close" aria-label="Close dialog" onclick={on_close}>
                        {"×"}
                    </button>
                </div>
                <div class="modal__body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
