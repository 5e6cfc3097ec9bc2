pub mod browser;
pub mod dom;
pub mod listing;
pub mod query;
pub mod search;
pub mod traits;
pub mod types;

pub use browser::ChromeSession;
pub use dom::{ListingNode, ResultsPage};
pub use listing::ListingExtractor;
pub use query::{build_locator, Locator};
pub use search::{get_hotel_details, scrape_with};
pub use traits::PageSession;
pub use types::SearchRequest;
