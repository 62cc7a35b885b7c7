//! Domain types shared by the character sheet frontend and its host.
//!
//! Everything in this crate is pure: no browser APIs, no network. The
//! frontend renders what these functions compute and forwards effects to
//! whatever the host page injects.

pub mod browser;
pub mod currency;
pub mod draft;
pub mod ledger;
pub mod transaction;

pub use browser::{
    visible_actions, visible_fields, BadgeTone, BrowserAction, BrowserItem, BrowserState,
    DescriptionEdit, DescriptionUpdate, ItemBadge, ItemField, MenuAction, TabData, TabKey, TabSpec,
};
pub use currency::{format_balance, format_coins, Balance, Coins, Denomination};
pub use draft::{
    delete_transaction, parse_coin_input, submit_transaction, DeleteOutcome, LedgerEffects,
    SubmissionGate, SubmitError, TransactionDraft, ValidationError, MAX_DESCRIPTION_LENGTH,
};
pub use ledger::{
    balance, format_history, summarize, AmountType, FormattedTransaction, LedgerSummary,
};
pub use transaction::{
    category_options_for, CreateTransactionRequest, DeleteTransactionRequest, Transaction,
    TransactionCategory, TransactionIdError, TransactionKind, TransactionListResponse,
};

/// A character's abilities or powers, as served by the host API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterItemsResponse<P> {
    pub abilities: Vec<BrowserItem<P>>,
    pub powers: Vec<BrowserItem<P>>,
}

/// Request to change an item's description
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateDescriptionRequest {
    pub character_id: String,
    pub item_id: String,
    pub description: String,
}
