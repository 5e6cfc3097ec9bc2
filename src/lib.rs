pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod scrapers;

pub use config::{BrowserConfig, ScrapeOptions};
pub use error::{Result, ScrapeError};
pub use models::ListingRecord;
