use crate::error::Result;
use crate::models::ListingRecord;
use crate::scrapers::dom::{parse_selector, ListingNode};
use scraper::Selector;
use tracing::debug;

pub const TITLE_SELECTOR: &str = r#"[data-testid="title"]"#;
pub const REVIEW_SELECTOR: &str = r#"[data-testid="review-score"]"#;
pub const PRICE_CONTAINER_SELECTOR: &str = r#"[data-testid="availability-rate-information"]"#;
pub const ORIGINAL_PRICE_SELECTOR: &str = r#"[aria-hidden="true"]:not([data-testid])"#;
pub const CURRENT_PRICE_SELECTOR: &str = r#"[data-testid="price-and-discounted-price"]"#;

/// Pre-parsed selectors for the fields of a property card
pub struct ListingExtractor {
    title: Selector,
    review: Selector,
    price_container: Selector,
    original_price: Selector,
    current_price: Selector,
}

impl ListingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: parse_selector(TITLE_SELECTOR)?,
            review: parse_selector(REVIEW_SELECTOR)?,
            price_container: parse_selector(PRICE_CONTAINER_SELECTOR)?,
            original_price: parse_selector(ORIGINAL_PRICE_SELECTOR)?,
            current_price: parse_selector(CURRENT_PRICE_SELECTOR)?,
        })
    }

    /// Build a record from one listing node.
    ///
    /// Never fails: each field is looked up on its own and a missing
    /// element only leaves that field empty.
    pub fn extract(&self, node: &ListingNode<'_>) -> ListingRecord {
        let hotel_name = node.lookup(&self.title).map(|title| title.text());

        let (review_score, review_count) = match node.lookup(&self.review) {
            Some(block) => parse_reviews(&block.text()),
            None => (None, None),
        };

        let mut price = None;
        let mut original_price = None;
        if let Some(container) = node.lookup(&self.price_container) {
            original_price = container
                .lookup(&self.original_price)
                .map(|el| strip_thousands(&el.text()));
            price = container
                .lookup(&self.current_price)
                .map(|el| strip_thousands(&el.text()));
        }

        let record = ListingRecord {
            hotel_name,
            review_score,
            review_count,
            price,
            original_price,
        };
        debug!("Extracted listing: {:?}", record);
        record
    }
}

/// Read the review score and review count out of a review block.
///
/// Lines are scanned in order and a later match overwrites an earlier one.
pub fn parse_reviews(text: &str) -> (Option<f64>, Option<u64>) {
    let mut score = None;
    let mut count = None;

    for line in text.lines() {
        let line = line.trim();

        if is_decimal(line) {
            // Out-of-range numbers are not scores
            if let Ok(value) = line.parse::<f64>() {
                if (0.0..=10.0).contains(&value) {
                    score = Some(value);
                }
            }
        } else if line.contains("reviews") {
            let leading = line.split_whitespace().next().unwrap_or("");
            if let Ok(value) = strip_thousands(leading).parse::<u64>() {
                count = Some(value);
            }
        }
    }

    (score, count)
}

/// Digits with at most one decimal point, e.g. "8", "8.7", ".5"
fn is_decimal(s: &str) -> bool {
    let digits = s.replacen('.', "", 1);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn strip_thousands(s: &str) -> String {
    s.replace(',', "")
}
