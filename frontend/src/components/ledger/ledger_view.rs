use shared::{format_history, summarize, Transaction};
use yew::prelude::*;

use super::balance_summary::BalanceSummary;
use super::transaction_form::TransactionForm;
use super::transaction_history::TransactionHistory;
use crate::hooks::{use_ledger, LedgerEffectsHandle};

#[derive(Properties, PartialEq)]
pub struct LedgerViewProps {
    pub character_id: AttrValue,
    /// The host's current snapshot of the ledger
    pub transactions: Vec<Transaction>,
    pub effects: LedgerEffectsHandle,
}

/// Wallet balance, history and transaction form for one character.
///
/// Balance and history are derived from `transactions` on every render.
/// Appends and deletes only go through `effects`; the list shown here
/// changes when the host passes a new one.
#[function_component(LedgerView)]
pub fn ledger_view(props: &LedgerViewProps) -> Html {
    let ledger = use_ledger(&props.character_id, &props.effects);

    let summary = summarize(&props.transactions);
    let rows = format_history(&props.transactions);

    html! {
        <div class="ledger-view">
            <BalanceSummary {summary} />

            {if let Some(error) = ledger.state.delete_error.as_ref() {
                let dismiss = {
                    let dismiss = ledger.actions.dismiss_delete_error.clone();
                    Callback::from(move |_: MouseEvent| dismiss.emit(()))
                };
                html! {
                    <div class="form-message error">
                        <span>{format!("Could not delete transaction: {}", error)}</span>
                        <button class="btn btn-link" onclick={dismiss}>{"Dismiss"}</button>
                    </div>
                }
            } else { html! {} }}

            <TransactionForm
                state={ledger.state.clone()}
                actions={ledger.actions.clone()}
            />

            <TransactionHistory
                {rows}
                on_delete={ledger.actions.delete.clone()}
                pending={ledger.state.pending}
            />
        </div>
    }
}
