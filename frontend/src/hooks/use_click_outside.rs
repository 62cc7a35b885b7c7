use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Node};
use yew::prelude::*;

use crate::services::logging::Logger;

/// Calls `on_outside` whenever a `mousedown` lands outside `node_ref`
/// while `active` is true.
///
/// A single document listener is attached when the component mounts and
/// removed when it unmounts. Re-renders only refresh the `active` flag and
/// the callback the listener reads; they never register again.
#[hook]
pub fn use_click_outside(node_ref: NodeRef, active: bool, on_outside: Callback<()>) {
    let latest: Rc<RefCell<(bool, Callback<()>)>> =
        use_mut_ref(|| (active, on_outside.clone()));
    *latest.borrow_mut() = (active, on_outside);

    use_effect_with((), move |_| {
        let document = window().and_then(|w| w.document());

        let listener = document.as_ref().map(|document| {
            let latest = latest.clone();
            let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
                let (active, on_outside) = {
                    let latest = latest.borrow();
                    (latest.0, latest.1.clone())
                };
                if !active {
                    return;
                }

                let inside = match (node_ref.get(), event.target()) {
                    (Some(root), Some(target)) => target
                        .dyn_into::<Node>()
                        .map(|target| root.contains(Some(&target)))
                        .unwrap_or(false),
                    _ => false,
                };

                if !inside {
                    on_outside.emit(());
                }
            }) as Box<dyn FnMut(_)>);

            let added = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            if let Err(e) = added {
                Logger::warn_with_component(
                    "click-outside",
                    &format!("Failed to add listener: {:?}", e),
                );
            }
            closure
        });

        move || {
            if let (Some(document), Some(closure)) = (document, listener) {
                document
                    .remove_event_listener_with_callback(
                        "mousedown",
                        closure.as_ref().unchecked_ref(),
                    )
                    .ok();
                Logger::debug_with_component("click-outside", "Removed document listener");
            }
        }
    });
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::test_support::{click, document, mount_point, mousedown, query, settle};
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        active: bool,
        on_outside: Callback<()>,
    }

    /// Renders an inside region plus a button that forces re-renders.
    #[function_component(Harness)]
    fn harness(props: &HarnessProps) -> Html {
        let renders = use_state(|| 0u32);
        let node_ref = use_node_ref();
        use_click_outside(node_ref.clone(), props.active, props.on_outside.clone());

        let rerender = {
            let renders = renders.clone();
            Callback::from(move |_: MouseEvent| renders.set(*renders + 1))
        };

        html! {
            <div>
                <div class="inside" ref={node_ref}>
                    <span class="inside-child">{*renders}</span>
                </div>
                <button class="rerender" onclick={rerender}>{"again"}</button>
            </div>
        }
    }

    fn counting(count: &Rc<Cell<u32>>) -> Callback<()> {
        let count = count.clone();
        Callback::from(move |_: ()| count.set(count.get() + 1))
    }

    #[wasm_bindgen_test]
    async fn test_single_listener_for_the_whole_mount() {
        let outside = Rc::new(Cell::new(0));
        let root = mount_point();
        let handle = yew::Renderer::<Harness>::with_root_and_props(
            root.clone(),
            HarnessProps {
                active: true,
                on_outside: counting(&outside),
            },
        )
        .render();
        settle().await;

        let rerender = query(&root, ".rerender").expect("rerender button");
        for _ in 0..3 {
            click(&rerender);
            settle().await;
        }
        assert_eq!(
            query(&root, ".inside-child").and_then(|e| e.text_content()),
            Some("3".to_string())
        );

        mousedown(&document().body().expect("document has a body"));
        assert_eq!(outside.get(), 1);

        mousedown(&query(&root, ".inside-child").expect("inside node"));
        assert_eq!(outside.get(), 1);

        handle.destroy();
        settle().await;
        mousedown(&document().body().expect("document has a body"));
        assert_eq!(outside.get(), 1);
    }

    #[wasm_bindgen_test]
    async fn test_inactive_ignores_outside_clicks() {
        let outside = Rc::new(Cell::new(0));
        let handle = yew::Renderer::<Harness>::with_root_and_props(
            mount_point(),
            HarnessProps {
                active: false,
                on_outside: counting(&outside),
            },
        )
        .render();
        settle().await;

        mousedown(&document().body().expect("document has a body"));
        assert_eq!(outside.get(), 0);

        handle.destroy();
    }
}
