pub mod item_details;
pub mod item_row;
pub mod tabbed_item_browser;

pub use tabbed_item_browser::TabbedItemBrowser;
