use shared::{ItemBadge, MenuAction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ItemRowProps {
    pub name: AttrValue,
    pub type_label: AttrValue,
    #[prop_or_default]
    pub badges: Vec<ItemBadge>,
    pub selected: bool,
    pub show_menu: bool,
    pub menu_open: bool,
    /// Visible entries of the open menu; empty while closed
    #[prop_or_default]
    pub actions: Vec<MenuAction<Callback<()>>>,
    /// Attached to the menu wrapper only while this row's menu is open
    pub menu_ref: NodeRef,
    pub on_select: Callback<()>,
    pub on_toggle_menu: Callback<()>,
    pub on_close_menu: Callback<()>,
}

#[function_component(ItemRow)]
pub fn item_row(props: &ItemRowProps) -> Html {
    let on_row_click = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(()))
    };

    // The kebab sits inside the row; keep its click away from the row's select handler
    let on_menu_button = {
        let on_toggle_menu = props.on_toggle_menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_toggle_menu.emit(());
        })
    };

    let on_menu_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    html! {
        <li
            class={classes!("item-row", props.selected.then_some("selected"))}
            onclick={on_row_click}
        >
            <div class="item-row-main">
                <span class="item-name">{&props.name}</span>
                <span class="item-type">{&props.type_label}</span>
                {for props.badges.iter().map(|badge| html! {
                    <span class={classes!("badge", badge.tone.css_class())}>{&badge.label}</span>
                })}
            </div>

            if props.show_menu {
                <div
                    class="item-menu"
                    ref={if props.menu_open { props.menu_ref.clone() } else { NodeRef::default() }}
                    onclick={on_menu_click}
                >
                    <button
                        class="item-menu-button"
                        aria-label="Item actions"
                        aria-expanded={props.menu_open.to_string()}
                        onclick={on_menu_button}
                    >
                        {"⋮"}
                    </button>

                    if props.menu_open {
                        <div class="item-menu-dropdown">
                            if props.actions.is_empty() {
                                <div class="item-menu-empty">{"No actions"}</div>
                            }
                            {for props.actions.iter().map(|action| {
                                let class = classes!(
                                    "item-menu-entry",
                                    action.destructive.then_some("destructive")
                                );
                                let onclick = {
                                    let handler = action.handler.clone();
                                    let on_close_menu = props.on_close_menu.clone();
                                    Callback::from(move |e: MouseEvent| {
                                        e.stop_propagation();
                                        handler.emit(());
                                        on_close_menu.emit(());
                                    })
                                };
                                html! {
                                    <div {class} {onclick}>
                                        {&action.label}
                                    </div>
                                }
                            })}
                        </div>
                    }
                </div>
            }
        </li>
    }
}
