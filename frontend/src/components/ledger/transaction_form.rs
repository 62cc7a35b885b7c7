use shared::{category_options_for, Denomination, TransactionKind};
use yew::prelude::*;

use crate::hooks::use_ledger::{LedgerFormState, UseLedgerActions};

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub state: LedgerFormState,
    pub actions: UseLedgerActions,
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let state = &props.state;
    let actions = &props.actions;
    let draft = &state.draft;

    let onsubmit = {
        let submit = actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    let coin_input = |denomination: Denomination, oninput: Callback<InputEvent>| {
        let id = format!("coin-{}", denomination.abbreviation().to_lowercase());
        html! {
            <div class="form-group coin-input">
                <label for={id.clone()}>{denomination.abbreviation()}</label>
                <input
                    type="number"
                    id={id}
                    min="0"
                    step="1"
                    placeholder="0"
                    value={state.coins.get(denomination).to_string()}
                    {oninput}
                    disabled={state.pending}
                />
            </div>
        }
    };

    html! {
        <section class="transaction-form-section">
            <h2>{"New transaction"}</h2>

            {if let Some(error) = state.form_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            {if state.form_success {
                html! { <div class="form-message success">{"Transaction recorded"}</div> }
            } else { html! {} }}

            <form class="transaction-form" {onsubmit}>
                <div class="form-row">
                    <div class="form-group">
                        <label for="transaction-kind">{"Type"}</label>
                        <select
                            id="transaction-kind"
                            onchange={actions.on_kind_change.clone()}
                            disabled={state.pending}
                        >
                            {for TransactionKind::ALL.iter().map(|kind| html! {
                                <option value={kind.as_str()} selected={*kind == draft.kind}>
                                    {kind.label()}
                                </option>
                            })}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="transaction-category">{"Category"}</label>
                        <select
                            id="transaction-category"
                            onchange={actions.on_category_change.clone()}
                            disabled={state.pending}
                        >
                            {for category_options_for(draft.kind).iter().map(|category| {
                                let selected = *category == draft.category;
                                html! {
                                    <option value={category.as_str()} {selected}>
                                        {category.label()}
                                    </option>
                                }
                            })}
                        </select>
                    </div>
                </div>

                <div class="form-row coins-row">
                    {coin_input(Denomination::Gold, actions.on_gold_change.clone())}
                    {coin_input(Denomination::Silver, actions.on_silver_change.clone())}
                    {coin_input(Denomination::Bronze, actions.on_bronze_change.clone())}
                </div>

                <div class="form-group">
                    <label for="transaction-description">{"Description"}</label>
                    <input
                        type="text"
                        id="transaction-description"
                        placeholder="Goblin loot, inn room, new rope..."
                        value={draft.description.clone()}
                        oninput={actions.on_description_change.clone()}
                        disabled={state.pending}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={state.pending}>
                    {if state.pending { "Saving..." } else { "Record" }}
                </button>
            </form>
        </section>
    }
}
