// Accessibility helpers

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const FOCUSABLE: &str =
    "button:not([disabled]), a[href], input:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the page load.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #c0392b;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers
///
/// Updates the text content of the #calendar-status element if present.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id("calendar-status"))
    {
        node.set_text_content(Some(msg));
    }
}

fn focusable_in(container_id: &str) -> Vec<HtmlElement> {
    let Some(container) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(container_id))
    else {
        return Vec::new();
    };
    let Ok(nodes) = container.query_selector_all(FOCUSABLE) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Move focus to the first focusable element inside `container_id`.
pub fn trap_focus_in(container_id: &str) {
    if let Some(first) = focusable_in(container_id).first() {
        let _ = first.focus();
    }
}

/// Wrap Tab navigation at the edges of `container_id`.
///
/// Returns `true` when focus was moved and the key event should be
/// suppressed.
pub fn cycle_focus(container_id: &str, backwards: bool) -> bool {
    let items = focusable_in(container_id);
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return false;
    };
    let active = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.active_element());
    let is_active = |el: &HtmlElement| {
        let node: &web_sys::Node = el.as_ref();
        active.as_ref().is_some_and(|a| a.is_same_node(Some(node)))
    };
    if backwards && is_active(first) {
        let _ = last.focus();
        true
    } else if !backwards && is_active(last) {
        let _ = first.focus();
        true
    } else {
        false
    }
}

/// Return focus to the element that opened a dialog.
pub fn restore_focus(element_id: &str) {
    if let Some(el) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
