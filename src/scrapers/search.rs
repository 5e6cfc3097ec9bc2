use crate::config::{BrowserConfig, ScrapeOptions};
use crate::error::Result;
use crate::export::export_csv;
use crate::models::ListingRecord;
use crate::scrapers::browser::ChromeSession;
use crate::scrapers::dom::{parse_selector, ResultsPage};
use crate::scrapers::listing::ListingExtractor;
use crate::scrapers::query::{build_locator, Locator};
use crate::scrapers::traits::PageSession;
use crate::scrapers::types::SearchRequest;
use std::path::Path;
use std::thread;
use tracing::{info, warn};

/// Scrape one results page for `request` with a fresh headless Chrome.
///
/// The request is validated before Chrome is launched. When CSV output is
/// configured the records are exported after the browser is closed.
pub fn get_hotel_details(
    request: &SearchRequest,
    browser: &BrowserConfig,
    options: &ScrapeOptions,
) -> Result<Vec<ListingRecord>> {
    let locator = build_locator(&options.base_url, request)?;
    info!("Search URL: {}", locator);

    let session = ChromeSession::launch(browser)?;
    let records = scrape_with(session, &locator, options)?;

    if let Some(path) = &options.csv_output {
        export_csv(&records, path)?;
        info!("💾 Saved {} listings to {}", records.len(), path.display());
    }

    Ok(records)
}

/// Run the scrape on `session`, closing it on every exit path
pub fn scrape_with<S: PageSession>(
    session: S,
    locator: &Locator,
    options: &ScrapeOptions,
) -> Result<Vec<ListingRecord>> {
    let outcome = scrape_page(&session, locator, options);
    let closed = session.close();

    let records = outcome?;
    if let Err(e) = closed {
        warn!("Browser did not close cleanly: {}", e);
    }
    Ok(records)
}

fn scrape_page<S: PageSession>(
    session: &S,
    locator: &Locator,
    options: &ScrapeOptions,
) -> Result<Vec<ListingRecord>> {
    let card_selector = parse_selector(&options.listing_selector)?;
    let extractor = ListingExtractor::new()?;

    info!("Opening search results page...");
    session.navigate(locator)?;

    if !options.settle_delay.is_zero() {
        info!("Waiting {:?} for the page to render...", options.settle_delay);
        thread::sleep(options.settle_delay);
    }

    // Handle sign-in alert
    if session.await_optional_dismiss(&options.dismiss_selector, options.dismiss_timeout)? {
        info!("Dismissed sign-in modal");
    } else {
        info!("Sign-in modal did not appear, continuing...");
    }

    let html = session.page_html()?;
    if let Some(dir) = &options.debug_dir {
        save_debug_capture(session, dir, &html)?;
    }
    let page = ResultsPage::from_html(&html);

    let nodes = page.list_nodes(&card_selector);
    info!("Found {} property cards", nodes.len());

    let records: Vec<ListingRecord> = nodes.iter().map(|node| extractor.extract(node)).collect();

    let blank = records.iter().filter(|r| r.is_empty()).count();
    if blank > 0 {
        warn!("{} property cards had no readable fields", blank);
    }

    info!("Successfully scraped {} listings", records.len());
    Ok(records)
}

fn save_debug_capture<S: PageSession>(session: &S, dir: &Path, html: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let html_path = dir.join("results_page.html");
    std::fs::write(&html_path, html)?;
    info!("Saved page HTML to {} ({} bytes)", html_path.display(), html.len());

    if let Some(png) = session.screenshot_png()? {
        let png_path = dir.join("results_screenshot.png");
        std::fs::write(&png_path, png)?;
        info!("Saved screenshot to {}", png_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::scrapers::query::DEFAULT_SEARCH_URL;
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <div role="dialog"><button aria-label="Dismiss sign-in info.">x</button></div>
          <div data-testid="property-card">
            <div data-testid="title">Hotel A</div>
            <div data-testid="review-score"><div>8.5</div><div>120 reviews</div></div>
            <div data-testid="availability-rate-information">
              <span data-testid="price-and-discounted-price">$100</span>
            </div>
          </div>
          <div data-testid="property-card"></div>
        </body></html>
    "#;

    /// In-memory page that records what the pipeline did with it
    struct FakeSession {
        html: &'static str,
        overlay: bool,
        fail_navigation: bool,
        visited: Rc<RefCell<Vec<String>>>,
        closed: Rc<Cell<bool>>,
    }

    impl FakeSession {
        fn new(html: &'static str) -> Self {
            Self {
                html,
                overlay: false,
                fail_navigation: false,
                visited: Rc::default(),
                closed: Rc::default(),
            }
        }
    }

    impl PageSession for FakeSession {
        fn navigate(&self, locator: &Locator) -> Result<()> {
            if self.fail_navigation {
                return Err(ScrapeError::Session("browser crashed".to_string()));
            }
            self.visited.borrow_mut().push(locator.to_string());
            Ok(())
        }

        fn await_optional_dismiss(&self, _selector: &str, _timeout: Duration) -> Result<bool> {
            Ok(self.overlay)
        }

        fn page_html(&self) -> Result<String> {
            Ok(self.html.to_string())
        }

        fn close(self) -> Result<()> {
            self.closed.set(true);
            Ok(())
        }
    }

    fn locator() -> Locator {
        let request = SearchRequest::new(
            "Paris",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        )
        .with_stars([4, 5]);
        build_locator(DEFAULT_SEARCH_URL, &request).unwrap()
    }

    #[test]
    fn test_scrape_extracts_every_card_and_closes() {
        let session = FakeSession::new(RESULTS_PAGE);
        let visited = session.visited.clone();
        let closed = session.closed.clone();

        let records = scrape_with(session, &locator(), &ScrapeOptions::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hotel_name.as_deref(), Some("Hotel A"));
        assert_eq!(records[0].review_score, Some(8.5));
        assert_eq!(records[0].review_count, Some(120));
        assert_eq!(records[0].price.as_deref(), Some("$100"));
        assert!(records[1].is_empty());

        assert_eq!(visited.borrow().len(), 1);
        assert!(visited.borrow()[0].contains("nflt=class%3D4%3Bclass%3D5"));
        assert!(closed.get());
    }

    #[test]
    fn test_overlay_presence_does_not_change_results() {
        let mut session = FakeSession::new(RESULTS_PAGE);
        session.overlay = true;

        let records = scrape_with(session, &locator(), &ScrapeOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_session_fault_still_closes() {
        let mut session = FakeSession::new(RESULTS_PAGE);
        session.fail_navigation = true;
        let closed = session.closed.clone();

        let result = scrape_with(session, &locator(), &ScrapeOptions::default());

        assert!(matches!(result, Err(ScrapeError::Session(_))));
        assert!(closed.get());
    }

    #[test]
    fn test_bad_listing_selector_still_closes() {
        let session = FakeSession::new(RESULTS_PAGE);
        let closed = session.closed.clone();
        let options = ScrapeOptions {
            listing_selector: "[[".to_string(),
            ..ScrapeOptions::default()
        };

        let result = scrape_with(session, &locator(), &options);

        assert!(matches!(result, Err(ScrapeError::Selector { .. })));
        assert!(closed.get());
    }

    #[test]
    fn test_page_without_listings() {
        let session = FakeSession::new("<html><body><p>No results</p></body></html>");

        let records = scrape_with(session, &locator(), &ScrapeOptions::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_debug_capture_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let options = ScrapeOptions {
            debug_dir: Some(dir.path().join("debug")),
            ..ScrapeOptions::default()
        };

        scrape_with(FakeSession::new(RESULTS_PAGE), &locator(), &options).unwrap();

        let saved = std::fs::read_to_string(dir.path().join("debug/results_page.html")).unwrap();
        assert!(saved.contains("Hotel A"));
        assert!(!dir.path().join("debug/results_screenshot.png").exists());
    }

    #[test]
    fn test_invalid_request_fails_before_launch() {
        let request = SearchRequest::new(
            "Paris",
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );

        let result = get_hotel_details(&request, &BrowserConfig::default(), &ScrapeOptions::default());
        assert!(matches!(result, Err(ScrapeError::InvalidRequest(_))));
    }
}
