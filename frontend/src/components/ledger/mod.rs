pub mod balance_summary;
pub mod ledger_view;
pub mod transaction_form;
pub mod transaction_history;

pub use ledger_view::LedgerView;
