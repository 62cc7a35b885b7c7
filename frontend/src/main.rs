use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    BadgeTone, BrowserItem, CharacterItemsResponse, CreateTransactionRequest,
    DeleteTransactionRequest, DescriptionUpdate, ItemBadge, ItemField, LedgerEffects, MenuAction,
    TabData, TabSpec, Transaction, UpdateDescriptionRequest,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;
#[cfg(all(test, target_arch = "wasm32"))]
mod test_support;

use components::{LedgerView, TabbedItemBrowser};
use config::AppConfig;
use hooks::LedgerEffectsHandle;
use services::api::ApiClient;
use services::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SheetTab {
    Abilities,
    Powers,
}

impl SheetTab {
    /// Path segment used by the items API
    fn section(&self) -> &'static str {
        match self {
            SheetTab::Abilities => "abilities",
            SheetTab::Powers => "powers",
        }
    }
}

/// Sheet-specific item data. Only the extractors below read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SheetItemDetails {
    level: Option<u32>,
    cost: Option<String>,
    range: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

type SheetItem = BrowserItem<SheetItemDetails>;

fn build_tab_data(
    items: Option<CharacterItemsResponse<SheetItemDetails>>,
) -> TabData<SheetTab, SheetItemDetails> {
    let tabs = vec![
        TabSpec::new(SheetTab::Abilities, "Abilities")
            .with_placeholder("Select an ability to see its details"),
        TabSpec::new(SheetTab::Powers, "Powers")
            .with_placeholder("Select a power to see its details"),
    ];
    let (abilities, powers) = items.map(|i| (i.abilities, i.powers)).unwrap_or_default();

    TabData::new(tabs)
        .with_items(SheetTab::Abilities, abilities)
        .with_items(SheetTab::Powers, powers)
}

/// The page's ledger effects: call the API, then reload the list so the
/// page state stays the only copy of the transactions.
struct HostLedger {
    api: ApiClient,
    character_id: String,
    transactions: UseStateHandle<Vec<Transaction>>,
}

impl HostLedger {
    async fn refresh(&self) {
        match self.api.list_transactions(&self.character_id).await {
            Ok(list) => self.transactions.set(list),
            Err(e) => Logger::error_with_component(
                "app",
                &format!("Failed to reload transactions: {}", e),
            ),
        }
    }
}

#[async_trait(?Send)]
impl LedgerEffects for HostLedger {
    async fn append_transaction(&self, request: CreateTransactionRequest) -> Result<(), String> {
        self.api.append_transaction(&request).await?;
        self.refresh().await;
        Ok(())
    }

    async fn delete_transaction(&self, request: DeleteTransactionRequest) -> Result<(), String> {
        self.api.delete_transaction(&request).await?;
        self.refresh().await;
        Ok(())
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_state(AppConfig::from_env);
    let api = ApiClient::with_base_url(config.api_base_url.clone());
    let character_id = config.character_id.clone();

    let transactions = use_state(Vec::<Transaction>::new);
    let tab_data = use_state(|| Rc::new(build_tab_data(None)));
    let favorites = use_state(HashSet::<String>::new);
    let page_error = use_state(|| Option::<String>::None);

    let ledger_effects = {
        let api = api.clone();
        let character_id = character_id.clone();
        let transactions = transactions.clone();
        use_state(move || {
            LedgerEffectsHandle::new(HostLedger {
                api,
                character_id,
                transactions,
            })
        })
    };

    let refresh_items = {
        let api = api.clone();
        let character_id = character_id.clone();
        let tab_data = tab_data.clone();
        let page_error = page_error.clone();
        Callback::from(move |_: ()| {
            let api = api.clone();
            let character_id = character_id.clone();
            let tab_data = tab_data.clone();
            let page_error = page_error.clone();
            spawn_local(async move {
                match api.get_items::<SheetItemDetails>(&character_id).await {
                    Ok(items) => tab_data.set(Rc::new(build_tab_data(Some(items)))),
                    Err(e) => {
                        let line = format!("Failed to load items: {}", e);
                        Logger::error_with_component("app", &line);
                        page_error.set(Some(e));
                    }
                }
            });
        })
    };

    // Initial load
    {
        let api = api.clone();
        let character_id = character_id.clone();
        let transactions = transactions.clone();
        let page_error = page_error.clone();
        let refresh_items = refresh_items.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.list_transactions(&character_id).await {
                    Ok(list) => transactions.set(list),
                    Err(e) => {
                        let line = format!("Failed to load transactions: {}", e);
                        Logger::error_with_component("app", &line);
                        page_error.set(Some(e));
                    }
                }
            });
            refresh_items.emit(());
            || ()
        });
    }

    let field_extractor = Callback::from(|item: SheetItem| {
        vec![
            ItemField::optional("Level", item.payload.level.map(|l| l.to_string())),
            ItemField::optional("Cost", item.payload.cost),
            ItemField::optional("Range", item.payload.range),
            ItemField::optional("Duration", item.payload.duration),
        ]
    });

    let badge_extractor = {
        let favorites = (*favorites).clone();
        Callback::from(move |item: SheetItem| {
            let mut badges: Vec<ItemBadge> = Vec::new();
            if favorites.contains(&item.id) {
                badges.push(ItemBadge::new("★", BadgeTone::Accent));
            }
            badges.extend(
                item.payload
                    .tags
                    .iter()
                    .map(|tag| ItemBadge::new(tag.clone(), BadgeTone::Neutral)),
            );
            badges
        })
    };

    let action_extractor = {
        let favorites = favorites.clone();
        let api = api.clone();
        let character_id = character_id.clone();
        let refresh_items = refresh_items.clone();
        let page_error = page_error.clone();
        Callback::from(move |(item, _tab): (SheetItem, SheetTab)| {
            let is_favorite = favorites.contains(&item.id);

            let toggle_favorite = {
                let favorites = favorites.clone();
                let id = item.id.clone();
                Callback::from(move |_: ()| {
                    let mut next = (*favorites).clone();
                    if !next.remove(&id) {
                        next.insert(id.clone());
                    }
                    favorites.set(next);
                })
            };

            let remove = {
                let api = api.clone();
                let character_id = character_id.clone();
                let refresh_items = refresh_items.clone();
                let page_error = page_error.clone();
                let id = item.id.clone();
                Callback::from(move |_: ()| {
                    let api = api.clone();
                    let character_id = character_id.clone();
                    let refresh_items = refresh_items.clone();
                    let page_error = page_error.clone();
                    let id = id.clone();
                    spawn_local(async move {
                        match api.remove_item(&character_id, &id).await {
                            Ok(()) => refresh_items.emit(()),
                            Err(e) => page_error.set(Some(e)),
                        }
                    });
                })
            };

            vec![
                MenuAction::new("Mark as favorite", toggle_favorite.clone())
                    .visible_if(!is_favorite),
                MenuAction::new("Remove favorite", toggle_favorite).visible_if(is_favorite),
                MenuAction::new("Remove from sheet", remove).destructive(),
            ]
        })
    };

    let on_add = {
        let api = api.clone();
        let character_id = character_id.clone();
        let refresh_items = refresh_items.clone();
        let page_error = page_error.clone();
        Callback::from(move |tab: SheetTab| {
            let api = api.clone();
            let character_id = character_id.clone();
            let refresh_items = refresh_items.clone();
            let page_error = page_error.clone();
            spawn_local(async move {
                match api.add_item(&character_id, tab.section()).await {
                    Ok(()) => refresh_items.emit(()),
                    Err(e) => page_error.set(Some(e)),
                }
            });
        })
    };

    let on_update_description = {
        let api = api.clone();
        let character_id = character_id.clone();
        let refresh_items = refresh_items.clone();
        let page_error = page_error.clone();
        Callback::from(move |update: DescriptionUpdate<SheetTab>| {
            let request = UpdateDescriptionRequest {
                character_id: character_id.clone(),
                item_id: update.item_id,
                description: update.text,
            };
            let api = api.clone();
            let refresh_items = refresh_items.clone();
            let page_error = page_error.clone();
            spawn_local(async move {
                match api.update_description(&request).await {
                    Ok(()) => refresh_items.emit(()),
                    Err(e) => page_error.set(Some(e)),
                }
            });
        })
    };

    let dismiss_error = {
        let page_error = page_error.clone();
        Callback::from(move |_: MouseEvent| page_error.set(None))
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"Character sheet"}</h1>
            </header>

            if let Some(error) = (*page_error).clone() {
                <div class="form-message error page-error">
                    <span>{error}</span>
                    <button class="btn btn-link" onclick={dismiss_error}>{"Dismiss"}</button>
                </div>
            }

            <main class="sheet">
                <section class="sheet-browser">
                    <TabbedItemBrowser<SheetTab, SheetItemDetails>
                        tab_data={(*tab_data).clone()}
                        default_tab={Some(SheetTab::Abilities)}
                        {field_extractor}
                        badge_extractor={Some(badge_extractor)}
                        action_extractor={Some(action_extractor)}
                        on_add={Some(on_add)}
                        on_update_description={Some(on_update_description)}
                    />
                </section>

                <section class="sheet-wallet">
                    <LedgerView
                        character_id={character_id.clone()}
                        transactions={(*transactions).clone()}
                        effects={(*ledger_effects).clone()}
                    />
                </section>
            </main>
        </div>
    }
}

fn main() {
    services::logging::init_tracing();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, payload: SheetItemDetails) -> SheetItem {
        BrowserItem {
            id: id.to_string(),
            name: id.to_string(),
            type_label: "Power".to_string(),
            description: String::new(),
            payload,
        }
    }

    #[test]
    fn test_build_tab_data_declares_both_tabs() {
        let data = build_tab_data(None);
        assert_eq!(data.first_tab(), Some(SheetTab::Abilities));
        assert!(data.contains_tab(SheetTab::Powers));
        assert!(data.items_for(SheetTab::Powers).is_empty());
    }

    #[test]
    fn test_build_tab_data_keeps_item_order() {
        let response = CharacterItemsResponse {
            abilities: vec![],
            powers: vec![
                item("fireball", SheetItemDetails::default()),
                item("shield", SheetItemDetails::default()),
            ],
        };
        let data = build_tab_data(Some(response));
        let ids: Vec<&str> = data
            .items_for(SheetTab::Powers)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["fireball", "shield"]);
    }
}
