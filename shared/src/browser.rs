//! Tab / selection / context-menu state for the item browser.
//!
//! Items are browsed in named tabs. The browser keeps three pieces of
//! transient state: which tab is active, which item in that tab is
//! selected, and which (single) context menu is open. Selection and menus
//! never survive a tab change.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Caller-defined tab identifier, usually a small fieldless enum.
pub trait TabKey: Copy + Eq + Hash + Debug + 'static {}

impl<T> TabKey for T where T: Copy + Eq + Hash + Debug + 'static {}

pub const DEFAULT_PLACEHOLDER: &str = "Select an item to see its details";

/// An item shown in the browser.
///
/// The common fields are rendered directly. Everything domain-specific
/// lives in `payload` and is only read by the caller's extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserItem<P> {
    pub id: String,
    pub name: String,
    pub type_label: String,
    pub description: String,
    pub payload: P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSpec<K> {
    pub key: K,
    pub label: String,
    /// Shown in the detail pane while nothing is selected
    pub placeholder: Option<String>,
}

impl<K> TabSpec<K> {
    pub fn new(key: K, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Declared tabs, in display order, and the items belonging to each.
#[derive(Debug, Clone, PartialEq)]
pub struct TabData<K: TabKey, P> {
    pub tabs: Vec<TabSpec<K>>,
    pub items: HashMap<K, Vec<BrowserItem<P>>>,
}

impl<K: TabKey, P> TabData<K, P> {
    pub fn new(tabs: Vec<TabSpec<K>>) -> Self {
        Self {
            tabs,
            items: HashMap::new(),
        }
    }

    pub fn with_items(mut self, key: K, items: Vec<BrowserItem<P>>) -> Self {
        self.items.insert(key, items);
        self
    }

    /// Items of `key` in caller order. Undeclared or missing tabs are empty.
    pub fn items_for(&self, key: K) -> &[BrowserItem<P>] {
        self.items.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_item(&self, key: K, item_id: &str) -> Option<&BrowserItem<P>> {
        self.items_for(key).iter().find(|item| item.id == item_id)
    }

    pub fn contains_tab(&self, key: K) -> bool {
        self.tabs.iter().any(|tab| tab.key == key)
    }

    pub fn first_tab(&self) -> Option<K> {
        self.tabs.first().map(|tab| tab.key)
    }

    pub fn placeholder_for(&self, key: K) -> &str {
        self.tabs
            .iter()
            .find(|tab| tab.key == key)
            .and_then(|tab| tab.placeholder.as_deref())
            .unwrap_or(DEFAULT_PLACEHOLDER)
    }
}

/// In-progress inline edit of an item's description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionEdit {
    pub item_id: String,
    pub original: String,
    pub text: String,
}

/// Payload for the caller's description-update handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionUpdate<K> {
    pub item_id: String,
    pub tab: K,
    pub text: String,
}

impl DescriptionEdit {
    /// The update to send, or `None` when the text is unchanged.
    pub fn commit<K: TabKey>(&self, tab: K) -> Option<DescriptionUpdate<K>> {
        let text = self.text.trim();
        if text == self.original.trim() {
            return None;
        }
        Some(DescriptionUpdate {
            item_id: self.item_id.clone(),
            tab,
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserAction<K> {
    SelectTab(K),
    SelectItem(String),
    ToggleMenu(String),
    CloseMenu,
    BeginEdit { item_id: String, text: String },
    EditText(String),
    EndEdit,
    /// Heal state after the caller replaced its data
    Reconcile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState<K: TabKey> {
    /// `None` only while no tab is declared at all
    pub active_tab: Option<K>,
    /// Id of the selected item in the active tab
    pub selected: Option<String>,
    /// At most one open context menu across the whole browser
    pub open_menu: Option<String>,
    pub editing: Option<DescriptionEdit>,
}

impl<K: TabKey> BrowserState<K> {
    /// Start on `default_tab` when it is declared, otherwise on the first tab.
    pub fn new<P>(default_tab: Option<K>, data: &TabData<K, P>) -> Self {
        let active_tab = default_tab
            .filter(|key| data.contains_tab(*key))
            .or_else(|| data.first_tab());

        Self {
            active_tab,
            selected: None,
            open_menu: None,
            editing: None,
        }
    }

    /// Activate `key`. Selection, menu and edit state are always dropped;
    /// re-selecting the active tab leaves the tab itself unchanged.
    pub fn select_tab(&mut self, key: K) {
        self.active_tab = Some(key);
        self.selected = None;
        self.open_menu = None;
        self.editing = None;
    }

    /// Select an item of the active tab. Ids not listed there are ignored.
    pub fn select_item<P>(&mut self, item_id: &str, data: &TabData<K, P>) {
        let Some(tab) = self.active_tab else {
            return;
        };
        if data.find_item(tab, item_id).is_none() {
            debug!("Ignoring selection of {:?}, not an item of {:?}", item_id, tab);
            return;
        }
        if self.editing.as_ref().is_some_and(|edit| edit.item_id != item_id) {
            self.editing = None;
        }
        self.selected = Some(item_id.to_string());
    }

    pub fn toggle_menu(&mut self, menu_id: &str) {
        if self.open_menu.as_deref() == Some(menu_id) {
            self.open_menu = None;
        } else {
            self.open_menu = Some(menu_id.to_string());
        }
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    pub fn is_menu_open(&self, menu_id: &str) -> bool {
        self.open_menu.as_deref() == Some(menu_id)
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selected.as_deref() == Some(item_id)
    }

    /// Resolve the selection against `data`.
    pub fn selected_item<'a, P>(&self, data: &'a TabData<K, P>) -> Option<&'a BrowserItem<P>> {
        let tab = self.active_tab?;
        let id = self.selected.as_deref()?;
        data.find_item(tab, id)
    }

    /// Apply `action` against the data currently shown.
    pub fn apply<P>(&mut self, action: BrowserAction<K>, data: &TabData<K, P>) {
        match action {
            BrowserAction::SelectTab(key) => self.select_tab(key),
            BrowserAction::SelectItem(item_id) => self.select_item(&item_id, data),
            BrowserAction::ToggleMenu(menu_id) => self.toggle_menu(&menu_id),
            BrowserAction::CloseMenu => self.close_menu(),
            BrowserAction::BeginEdit { item_id, text } => {
                if self.is_selected(&item_id) {
                    self.editing = Some(DescriptionEdit {
                        item_id,
                        original: text.clone(),
                        text,
                    });
                }
            }
            BrowserAction::EditText(text) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.text = text;
                }
            }
            BrowserAction::EndEdit => self.editing = None,
            BrowserAction::Reconcile => self.reconcile(data),
        }
    }

    /// Drop state that no longer matches `data`. An undeclared active tab
    /// falls back to the first declared one.
    pub fn reconcile<P>(&mut self, data: &TabData<K, P>) {
        let Some(tab) = self.active_tab.filter(|key| data.contains_tab(*key)) else {
            let fallback = data.first_tab();
            if self.active_tab != fallback {
                debug!(
                    "Active tab {:?} no longer declared, falling back to {:?}",
                    self.active_tab, fallback
                );
            }
            self.active_tab = fallback;
            self.selected = None;
            self.open_menu = None;
            self.editing = None;
            return;
        };

        let known = |id: &String| data.find_item(tab, id).is_some();

        if self.selected.as_ref().is_some_and(|id| !known(id)) {
            debug!("Selected item {:?} left the active tab, clearing selection", self.selected);
            self.selected = None;
        }
        if self.open_menu.as_ref().is_some_and(|id| !known(id)) {
            self.open_menu = None;
        }
        if self.editing.as_ref().is_some_and(|edit| !known(&edit.item_id)) {
            self.editing = None;
        }
    }
}

/// A labelled value in the detail pane. `None` or blank values are hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemField {
    pub label: String,
    pub value: Option<String>,
}

impl ItemField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    pub fn optional(label: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            value: value.map(Into::into),
        }
    }

    fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

/// Drop fields without a displayable value, keeping order.
pub fn visible_fields(fields: Vec<ItemField>) -> Vec<ItemField> {
    fields.into_iter().filter(ItemField::has_value).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeTone {
    Neutral,
    Accent,
    Warning,
}

impl BadgeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge-neutral",
            BadgeTone::Accent => "badge-accent",
            BadgeTone::Warning => "badge-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBadge {
    pub label: String,
    pub tone: BadgeTone,
}

impl ItemBadge {
    pub fn new(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

/// Context-menu entry. `handler` is whatever the UI layer invokes.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuAction<H> {
    pub label: String,
    pub show: bool,
    pub destructive: bool,
    pub handler: H,
}

impl<H> MenuAction<H> {
    pub fn new(label: impl Into<String>, handler: H) -> Self {
        Self {
            label: label.into(),
            show: true,
            destructive: false,
            handler,
        }
    }

    pub fn visible_if(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

pub fn visible_actions<H>(actions: Vec<MenuAction<H>>) -> Vec<MenuAction<H>> {
    actions.into_iter().filter(|action| action.show).collect()
}
