use std::rc::Rc;

use shared::{
    visible_actions, visible_fields, BrowserAction, BrowserItem, BrowserState, DescriptionUpdate,
    ItemBadge, ItemField, MenuAction, TabData, TabKey,
};
use yew::prelude::*;

use super::item_details::ItemDetails;
use super::item_row::ItemRow;
use crate::hooks::use_click_outside;

pub type ActionExtractor<K, P> = Callback<(BrowserItem<P>, K), Vec<MenuAction<Callback<()>>>>;

#[derive(Properties, PartialEq)]
pub struct TabbedItemBrowserProps<K: TabKey, P: Clone + PartialEq + 'static> {
    pub tab_data: Rc<TabData<K, P>>,
    /// Falls back to the first declared tab when unset or undeclared
    #[prop_or_default]
    pub default_tab: Option<K>,
    pub field_extractor: Callback<BrowserItem<P>, Vec<ItemField>>,
    #[prop_or_default]
    pub badge_extractor: Option<Callback<BrowserItem<P>, Vec<ItemBadge>>>,
    #[prop_or_default]
    pub action_extractor: Option<ActionExtractor<K, P>>,
    #[prop_or_default]
    pub on_add: Option<Callback<K>>,
    #[prop_or_default]
    pub on_update_description: Option<Callback<DescriptionUpdate<K>>>,
    #[prop_or(true)]
    pub show_menu: bool,
}

/// Browser state plus the data it was last checked against.
struct BrowserStore<K: TabKey, P> {
    state: BrowserState<K>,
    data: Rc<TabData<K, P>>,
}

enum StoreAction<K: TabKey, P> {
    Browser(BrowserAction<K>),
    DataChanged(Rc<TabData<K, P>>),
}

impl<K: TabKey, P> From<BrowserAction<K>> for StoreAction<K, P> {
    fn from(action: BrowserAction<K>) -> Self {
        StoreAction::Browser(action)
    }
}

impl<K: TabKey, P: 'static> Reducible for BrowserStore<K, P> {
    type Action = StoreAction<K, P>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.state.clone();
        let data = match action {
            StoreAction::Browser(action) => {
                state.apply(action, &self.data);
                self.data.clone()
            }
            StoreAction::DataChanged(data) => {
                state.reconcile(&data);
                data
            }
        };

        if state == self.state && Rc::ptr_eq(&data, &self.data) {
            self
        } else {
            Rc::new(Self { state, data })
        }
    }
}

/// List/detail browser over caller-defined tabs.
///
/// The component owns only transient UI state (active tab, selection,
/// open menu). Items are read through `tab_data` and the extractor
/// callbacks; every change to the items themselves is a callback to the
/// caller.
#[function_component(TabbedItemBrowser)]
pub fn tabbed_item_browser<K, P>(props: &TabbedItemBrowserProps<K, P>) -> Html
where
    K: TabKey,
    P: Clone + PartialEq + 'static,
{
    let store = {
        let data = props.tab_data.clone();
        let default_tab = props.default_tab;
        use_reducer(move || BrowserStore {
            state: BrowserState::new(default_tab, &data),
            data,
        })
    };
    let state = store.state.clone();
    let data = props.tab_data.clone();

    // Heal selection and menu whenever the caller swaps its data
    {
        let dispatcher = store.dispatcher();
        use_effect_with(data.clone(), move |data| {
            dispatcher.dispatch(StoreAction::DataChanged(data.clone()));
            || ()
        });
    }

    let menu_ref = use_node_ref();
    let close_menu = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BrowserAction::CloseMenu.into()))
    };
    use_click_outside(menu_ref.clone(), state.open_menu.is_some(), close_menu.clone());

    let Some(active_tab) = state.active_tab else {
        return html! {
            <div class="item-browser empty">
                <div class="empty-state">{"Nothing to show"}</div>
            </div>
        };
    };

    let tabs = data.tabs.iter().map(|tab| {
        let onclick = {
            let dispatcher = store.dispatcher();
            let key = tab.key;
            Callback::from(move |_: MouseEvent| {
                dispatcher.dispatch(BrowserAction::SelectTab(key).into())
            })
        };
        html! {
            <button
                class={classes!("browser-tab", (tab.key == active_tab).then_some("active"))}
                {onclick}
            >
                {&tab.label}
            </button>
        }
    });

    let add_button = props.on_add.as_ref().map(|on_add| {
        let onclick = on_add.reform(move |_: MouseEvent| active_tab);
        html! { <button class="btn btn-secondary add-item-btn" {onclick}>{"+ Add"}</button> }
    });

    let items = data.items_for(active_tab);

    let list = if items.is_empty() {
        html! {
            <div class="empty-state">
                <p>{"No items in this tab yet"}</p>
                {add_button.clone().unwrap_or_default()}
            </div>
        }
    } else {
        html! {
            <ul class="item-list">
                {for items.iter().map(|item| {
                    let menu_open = state.is_menu_open(&item.id);
                    let badges = props
                        .badge_extractor
                        .as_ref()
                        .map(|extract| extract.emit(item.clone()))
                        .unwrap_or_default();
                    let actions = match (&props.action_extractor, menu_open) {
                        (Some(extract), true) => {
                            visible_actions(extract.emit((item.clone(), active_tab)))
                        }
                        _ => Vec::new(),
                    };

                    let on_select = {
                        let dispatcher = store.dispatcher();
                        let id = item.id.clone();
                        Callback::from(move |_: ()| {
                            dispatcher.dispatch(BrowserAction::SelectItem(id.clone()).into())
                        })
                    };
                    let on_toggle_menu = {
                        let dispatcher = store.dispatcher();
                        let id = item.id.clone();
                        Callback::from(move |_: ()| {
                            dispatcher.dispatch(BrowserAction::ToggleMenu(id.clone()).into())
                        })
                    };

                    html! {
                        <ItemRow
                            key={item.id.clone()}
                            name={item.name.clone()}
                            type_label={item.type_label.clone()}
                            {badges}
                            selected={state.is_selected(&item.id)}
                            show_menu={props.show_menu}
                            {menu_open}
                            {actions}
                            menu_ref={menu_ref.clone()}
                            {on_select}
                            {on_toggle_menu}
                            on_close_menu={close_menu.clone()}
                        />
                    }
                })}
            </ul>
        }
    };

    let details = match state.selected_item(&data) {
        Some(item) => {
            let fields = visible_fields(props.field_extractor.emit(item.clone()));
            let editing = state.editing.clone().filter(|edit| edit.item_id == item.id);

            let on_begin_edit = {
                let dispatcher = store.dispatcher();
                let item_id = item.id.clone();
                let text = item.description.clone();
                Callback::from(move |_: ()| {
                    dispatcher.dispatch(
                        BrowserAction::BeginEdit {
                            item_id: item_id.clone(),
                            text: text.clone(),
                        }
                        .into(),
                    )
                })
            };
            let on_edit_text = {
                let dispatcher = store.dispatcher();
                Callback::from(move |text: String| {
                    dispatcher.dispatch(BrowserAction::EditText(text).into())
                })
            };
            let on_save = {
                let dispatcher = store.dispatcher();
                let on_update = props.on_update_description.clone();
                let update = editing.as_ref().and_then(|edit| edit.commit(active_tab));
                Callback::from(move |_: ()| {
                    if let (Some(on_update), Some(update)) = (on_update.as_ref(), update.clone()) {
                        on_update.emit(update);
                    }
                    dispatcher.dispatch(BrowserAction::EndEdit.into());
                })
            };
            let on_cancel = {
                let dispatcher = store.dispatcher();
                Callback::from(move |_: ()| dispatcher.dispatch(BrowserAction::EndEdit.into()))
            };

            html! {
                <ItemDetails
                    name={item.name.clone()}
                    type_label={item.type_label.clone()}
                    description={item.description.clone()}
                    {fields}
                    {editing}
                    can_edit={props.on_update_description.is_some()}
                    {on_begin_edit}
                    {on_edit_text}
                    {on_save}
                    {on_cancel}
                />
            }
        }
        None => html! {
            <div class="item-details placeholder">{data.placeholder_for(active_tab)}</div>
        },
    };

    html! {
        <div class="item-browser">
            <nav class="browser-tabs">
                {for tabs}
            </nav>
            <div class="browser-body">
                <div class="browser-list">
                    if !items.is_empty() {
                        <div class="browser-list-header">
                            {add_button.unwrap_or_default()}
                        </div>
                    }
                    {list}
                </div>
                <div class="browser-details">
                    {details}
                </div>
            </div>
        </div>
    }
}
