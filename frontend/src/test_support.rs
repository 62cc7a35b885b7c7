//! DOM helpers for the in-browser component tests.

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, HtmlElement};

pub fn document() -> web_sys::Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("tests run in a browser")
}

/// Fresh element attached to `<body>` to mount a component into.
pub fn mount_point() -> Element {
    let document = document();
    let root = document.create_element("div").expect("create mount point");
    document
        .body()
        .expect("document has a body")
        .append_child(&root)
        .expect("attach mount point");
    root
}

/// Let the scheduler render and run effects.
pub async fn settle() {
    TimeoutFuture::new(10).await;
}

pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).expect("valid selector")
}

pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let list = root.query_selector_all(selector).expect("valid selector");
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn click(element: &Element) {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("clickable element")
        .click();
}

/// Dispatch a bubbling `mousedown` from `target`.
pub fn mousedown(target: &web_sys::EventTarget) {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("mousedown", &init).expect("create event");
    target.dispatch_event(&event).expect("dispatch event");
}
