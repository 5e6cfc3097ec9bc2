use serde::{Deserialize, Serialize};

/// One hotel listing as scraped from a search results page.
///
/// Every field is independently optional: a card may show a price but no
/// reviews, or a review count without a score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingRecord {
    pub hotel_name: Option<String>,
    pub review_score: Option<f64>,
    pub review_count: Option<u64>,
    /// Current (possibly discounted) price, thousands separators removed
    pub price: Option<String>,
    /// Struck-through price shown next to a discount. Not part of the CSV columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
}

impl ListingRecord {
    /// True when nothing could be read from the listing
    pub fn is_empty(&self) -> bool {
        self.hotel_name.is_none()
            && self.review_score.is_none()
            && self.review_count.is_none()
            && self.price.is_none()
            && self.original_price.is_none()
    }
}
