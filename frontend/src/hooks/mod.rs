pub mod use_click_outside;
pub mod use_ledger;

pub use use_click_outside::use_click_outside;
pub use use_ledger::{use_ledger, LedgerEffectsHandle};
