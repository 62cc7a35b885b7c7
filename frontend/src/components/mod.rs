pub mod browser;
pub mod ledger;

pub use browser::TabbedItemBrowser;
pub use ledger::LedgerView;
