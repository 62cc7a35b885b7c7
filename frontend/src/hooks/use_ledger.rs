use std::rc::Rc;

use shared::{
    delete_transaction, parse_coin_input, submit_transaction, DeleteOutcome, Denomination,
    LedgerEffects, SubmissionGate, TransactionCategory, TransactionDraft, TransactionKind,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::logging::Logger;

const DELETE_CONFIRMATION: &str =
    "Delete this transaction? The balance will be recalculated.";
const SUCCESS_MESSAGE_MS: u32 = 3000;

/// Host-supplied ledger effects, compared by identity so props stay cheap.
#[derive(Clone)]
pub struct LedgerEffectsHandle(pub Rc<dyn LedgerEffects>);

impl LedgerEffectsHandle {
    pub fn new(effects: impl LedgerEffects + 'static) -> Self {
        Self(Rc::new(effects))
    }
}

impl PartialEq for LedgerEffectsHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Raw text of the three coin inputs, kept as typed until submit.
#[derive(Clone, Default, PartialEq)]
pub struct CoinInputs {
    pub gold: String,
    pub silver: String,
    pub bronze: String,
}

impl CoinInputs {
    pub fn get(&self, denomination: Denomination) -> &str {
        match denomination {
            Denomination::Gold => &self.gold,
            Denomination::Silver => &self.silver,
            Denomination::Bronze => &self.bronze,
        }
    }

    fn set(&mut self, denomination: Denomination, value: String) {
        match denomination {
            Denomination::Gold => self.gold = value,
            Denomination::Silver => self.silver = value,
            Denomination::Bronze => self.bronze = value,
        }
    }

    /// Copy the parsed coin values into `draft`.
    fn apply_to(&self, draft: &mut TransactionDraft) -> Result<(), shared::ValidationError> {
        for denomination in Denomination::ALL {
            draft.set_coins(denomination, parse_coin_input(denomination, self.get(denomination))?);
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq)]
pub struct LedgerFormState {
    pub draft: TransactionDraft,
    pub coins: CoinInputs,
    /// An append or delete is outstanding
    pub pending: bool,
    pub form_error: Option<String>,
    pub form_success: bool,
    pub delete_error: Option<String>,
}

pub struct UseLedgerResult {
    pub state: LedgerFormState,
    pub actions: UseLedgerActions,
}

#[derive(Clone, PartialEq)]
pub struct UseLedgerActions {
    pub on_kind_change: Callback<Event>,
    pub on_category_change: Callback<Event>,
    pub on_gold_change: Callback<InputEvent>,
    pub on_silver_change: Callback<InputEvent>,
    pub on_bronze_change: Callback<InputEvent>,
    pub on_description_change: Callback<InputEvent>,
    pub submit: Callback<()>,
    pub delete: Callback<String>,
    pub dismiss_delete_error: Callback<()>,
}

#[hook]
pub fn use_ledger(character_id: &str, effects: &LedgerEffectsHandle) -> UseLedgerResult {
    let draft = use_state(TransactionDraft::default);
    let coins = use_state(CoinInputs::default);
    let pending = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);
    let form_success = use_state(|| false);
    let delete_error = use_state(|| Option::<String>::None);

    // Lives outside render state so a double click in the same frame sees it
    let gate = use_mut_ref(SubmissionGate::default);

    let on_kind_change = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(kind) = TransactionKind::parse(&select.value()) {
                let mut next = (*draft).clone();
                next.set_kind(kind);
                draft.set(next);
                form_error.set(None);
            }
        })
    };

    let on_category_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(category) = TransactionCategory::parse(&select.value()) {
                let mut next = (*draft).clone();
                next.category = category;
                draft.set(next);
            }
        })
    };

    let coin_change = |denomination: Denomination| {
        let coins = coins.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*coins).clone();
            next.set(denomination, input.value());
            coins.set(next);
            form_error.set(None);
        })
    };
    let on_gold_change = coin_change(Denomination::Gold);
    let on_silver_change = coin_change(Denomination::Silver);
    let on_bronze_change = coin_change(Denomination::Bronze);

    let on_description_change = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.description = input.value();
            draft.set(next);
            form_error.set(None);
        })
    };

    let submit = {
        let character_id = character_id.to_string();
        let effects = effects.clone();
        let draft = draft.clone();
        let coins = coins.clone();
        let pending = pending.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let gate = gate.clone();

        Callback::from(move |_: ()| {
            let mut working = (*draft).clone();
            if let Err(e) = coins.apply_to(&mut working) {
                form_error.set(Some(e.to_string()));
                return;
            }
            if let Err(e) = working.validate(&character_id) {
                form_error.set(Some(e.to_string()));
                return;
            }

            if let Err(busy) = gate.borrow_mut().begin() {
                Logger::debug_with_component("ledger", &format!("Submit ignored: {}", busy));
                return;
            }

            let character_id = character_id.clone();
            let effects = effects.clone();
            let draft = draft.clone();
            let coins = coins.clone();
            let pending = pending.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let gate = gate.clone();

            spawn_local(async move {
                pending.set(true);
                form_error.set(None);
                form_success.set(false);

                match submit_transaction(&mut working, &character_id, effects.0.as_ref()).await {
                    Ok(()) => {
                        draft.set(working);
                        coins.set(CoinInputs::default());
                        form_success.set(true);
                        Logger::info_with_component("ledger", "Transaction recorded");

                        let form_success_clear = form_success.clone();
                        spawn_local(async move {
                            gloo::timers::future::TimeoutFuture::new(SUCCESS_MESSAGE_MS).await;
                            form_success_clear.set(false);
                        });
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "ledger",
                            &format!("Transaction not recorded: {}", e),
                        );
                        form_error.set(Some(e.to_string()));
                    }
                }

                gate.borrow_mut().finish();
                pending.set(false);
            });
        })
    };

    let delete = {
        let character_id = character_id.to_string();
        let effects = effects.clone();
        let pending = pending.clone();
        let delete_error = delete_error.clone();
        let gate = gate.clone();

        Callback::from(move |transaction_id: String| {
            if gate.borrow().is_pending() {
                return;
            }
            let confirmed = gloo::dialogs::confirm(DELETE_CONFIRMATION);
            if !confirmed {
                return;
            }
            if let Err(busy) = gate.borrow_mut().begin() {
                Logger::debug_with_component("ledger", &format!("Delete ignored: {}", busy));
                return;
            }

            let character_id = character_id.clone();
            let effects = effects.clone();
            let pending = pending.clone();
            let delete_error = delete_error.clone();
            let gate = gate.clone();

            spawn_local(async move {
                pending.set(true);
                delete_error.set(None);

                let outcome = delete_transaction(
                    &character_id,
                    &transaction_id,
                    confirmed,
                    effects.0.as_ref(),
                )
                .await;
                match outcome {
                    Ok(DeleteOutcome::Deleted) => {
                        let message = format!("Deleted {}", transaction_id);
                        Logger::info_with_component("ledger", &message);
                    }
                    Ok(DeleteOutcome::Cancelled) => {}
                    Err(message) => {
                        let line = format!("Delete failed: {}", message);
                        Logger::error_with_component("ledger", &line);
                        delete_error.set(Some(message));
                    }
                }

                gate.borrow_mut().finish();
                pending.set(false);
            });
        })
    };

    let dismiss_delete_error = {
        let delete_error = delete_error.clone();
        Callback::from(move |_: ()| delete_error.set(None))
    };

    let state = LedgerFormState {
        draft: (*draft).clone(),
        coins: (*coins).clone(),
        pending: *pending,
        form_error: (*form_error).clone(),
        form_success: *form_success,
        delete_error: (*delete_error).clone(),
    };

    let actions = UseLedgerActions {
        on_kind_change,
        on_category_change,
        on_gold_change,
        on_silver_change,
        on_bronze_change,
        on_description_change,
        submit,
        delete,
        dismiss_delete_error,
    };

    UseLedgerResult { state, actions }
}
