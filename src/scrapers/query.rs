use crate::error::{Result, ScrapeError};
use crate::scrapers::types::SearchRequest;
use std::collections::BTreeSet;
use std::fmt;
use url::{form_urlencoded, Url};

pub const DEFAULT_SEARCH_URL: &str = "https://www.booking.com/searchresults.html";

/// Fully-formed address of a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(Url);

impl Locator {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Render the star filter as a single filter-group value.
///
/// Each star becomes a `class=<s>;` token and the separator of the last
/// token is dropped, so `{3, 4}` gives `class=3;class=4` and `{}` gives "".
pub fn filter_group(stars: &BTreeSet<u8>) -> String {
    let mut group = String::new();
    for star in stars {
        group.push_str("class");
        group.push('=');
        group.push_str(&star.to_string());
        group.push(';');
    }
    group.pop();
    group
}

/// Turn a search request into the results page locator.
///
/// The filter group is sent twice: once as `nflt` inside the regular
/// parameters and again as a trailing `nflt`. The results page has always
/// been queried with this shape.
pub fn build_locator(base_url: &str, request: &SearchRequest) -> Result<Locator> {
    request.validate()?;

    let mut url = Url::parse(base_url)
        .map_err(|e| ScrapeError::Config(format!("bad search URL '{}': {}", base_url, e)))?;

    let group = filter_group(&request.stars);

    url.query_pairs_mut()
        .clear()
        .append_pair("ss", &request.city.replace(' ', "+"))
        .append_pair("lang", &request.language)
        .append_pair("checkin", &request.checkin.format("%Y-%m-%d").to_string())
        .append_pair("checkout", &request.checkout.format("%Y-%m-%d").to_string())
        .append_pair("group_adults", &request.adults.to_string())
        .append_pair("no_rooms", &request.rooms.to_string())
        .append_pair("group_children", &request.children.to_string())
        .append_pair("selected_currency", &request.currency)
        .append_pair("nflt", &group);

    // Trailing duplicate of the filter group
    let encoded_group: String = form_urlencoded::byte_serialize(group.as_bytes()).collect();
    let query = format!("{}&nflt={}", url.query().unwrap_or_default(), encoded_group);
    url.set_query(Some(&query));

    Ok(Locator(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pairs(locator: &Locator) -> Vec<(String, String)> {
        locator
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn nflt_values(locator: &Locator) -> Vec<String> {
        pairs(locator)
            .into_iter()
            .filter(|(k, _)| k == "nflt")
            .map(|(_, v)| v)
            .collect()
    }

    #[test]
    fn test_filter_group_strips_last_separator() {
        assert_eq!(filter_group(&BTreeSet::new()), "");
        assert_eq!(filter_group(&[3].into_iter().collect()), "class=3");
        assert_eq!(filter_group(&[3, 4].into_iter().collect()), "class=3;class=4");
    }

    #[test]
    fn test_paris_locator() {
        let request = SearchRequest::new("Paris", date("2024-06-01"), date("2024-06-05"))
            .with_occupancy(2, 0, 1)
            .with_stars([4, 5]);

        let locator = build_locator(DEFAULT_SEARCH_URL, &request).unwrap();

        assert!(locator.as_str().starts_with("https://www.booking.com/searchresults.html?ss=Paris&"));
        assert!(locator.as_str().ends_with("&nflt=class%3D4%3Bclass%3D5"));
        assert_eq!(nflt_values(&locator), vec!["class=4;class=5", "class=4;class=5"]);

        let pairs = pairs(&locator);
        assert_eq!(pairs.last().unwrap().0, "nflt");
        assert!(pairs.contains(&("checkin".to_string(), "2024-06-01".to_string())));
        assert!(pairs.contains(&("checkout".to_string(), "2024-06-05".to_string())));
        assert!(pairs.contains(&("group_adults".to_string(), "2".to_string())));
        assert!(pairs.contains(&("group_children".to_string(), "0".to_string())));
        assert!(pairs.contains(&("no_rooms".to_string(), "1".to_string())));
        assert!(pairs.contains(&("selected_currency".to_string(), "USD".to_string())));
        assert!(pairs.contains(&("lang".to_string(), "en-us".to_string())));
    }

    #[test]
    fn test_empty_star_filter() {
        let request = SearchRequest::new("Paris", date("2024-06-01"), date("2024-06-05"));
        let locator = build_locator(DEFAULT_SEARCH_URL, &request).unwrap();

        assert_eq!(nflt_values(&locator), vec!["", ""]);
        assert!(locator.as_str().ends_with("&nflt=&nflt="));
    }

    #[test]
    fn test_city_spaces_become_plus() {
        let request = SearchRequest::new("New York", date("2024-06-01"), date("2024-06-05"));
        let locator = build_locator(DEFAULT_SEARCH_URL, &request).unwrap();

        assert!(locator.as_str().contains("ss=New%2BYork"));
    }

    #[test]
    fn test_rejects_bad_dates() {
        let request = SearchRequest::new("Paris", date("2024-06-05"), date("2024-06-05"));
        let result = build_locator(DEFAULT_SEARCH_URL, &request);

        assert!(matches!(result, Err(ScrapeError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let request = SearchRequest::new("Paris", date("2024-06-01"), date("2024-06-05"));

        assert!(matches!(build_locator("not a url", &request), Err(ScrapeError::Config(_))));
    }
}
