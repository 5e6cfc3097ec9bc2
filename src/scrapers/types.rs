use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Search parameters for a hotel results page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    /// City or destination to search in
    pub city: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    /// Number of adults, at least one
    pub adults: u32,
    pub children: u32,
    /// Number of rooms, at least one
    pub rooms: u32,
    /// Star ratings (1-5) to filter on. Empty means no filtering.
    pub stars: BTreeSet<u8>,
    /// Three-letter currency code
    pub currency: String,
    /// Language tag, e.g. "en-us"
    pub language: String,
}

impl SearchRequest {
    /// Create a request for two adults in one room, priced in USD
    pub fn new(city: impl Into<String>, checkin: NaiveDate, checkout: NaiveDate) -> Self {
        Self {
            city: city.into(),
            checkin,
            checkout,
            adults: 2,
            children: 0,
            rooms: 1,
            stars: BTreeSet::new(),
            currency: "USD".to_string(),
            language: "en-us".to_string(),
        }
    }

    pub fn with_occupancy(mut self, adults: u32, children: u32, rooms: u32) -> Self {
        self.adults = adults;
        self.children = children;
        self.rooms = rooms;
        self
    }

    pub fn with_stars(mut self, stars: impl IntoIterator<Item = u8>) -> Self {
        self.stars = stars.into_iter().collect();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Check the request before anything is sent to the browser
    pub fn validate(&self) -> Result<()> {
        if self.city.trim().is_empty() {
            return Err(ScrapeError::InvalidRequest("city must not be empty".to_string()));
        }

        if self.checkin >= self.checkout {
            return Err(ScrapeError::InvalidRequest(format!(
                "check-in {} must be before check-out {}",
                self.checkin, self.checkout
            )));
        }

        if self.adults == 0 {
            return Err(ScrapeError::InvalidRequest("adult count must be positive".to_string()));
        }

        if self.rooms == 0 {
            return Err(ScrapeError::InvalidRequest("room count must be positive".to_string()));
        }

        if let Some(star) = self.stars.iter().find(|s| !(1..=5).contains(*s)) {
            return Err(ScrapeError::InvalidRequest(format!(
                "star rating {} is outside 1-5",
                star
            )));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ScrapeError::InvalidRequest(format!(
                "currency '{}' is not a three-letter code",
                self.currency
            )));
        }

        if self.language.trim().is_empty() {
            return Err(ScrapeError::InvalidRequest("language must not be empty".to_string()));
        }

        Ok(())
    }
}
