use crate::config::BrowserConfig;
use crate::error::{Result, ScrapeError};
use crate::scrapers::query::Locator;
use crate::scrapers::traits::PageSession;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Page session backed by a headless Chrome instance.
///
/// The Chrome process is killed when the session is closed or dropped.
pub struct ChromeSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch Chrome and open the tab used for the search
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let mut options = LaunchOptions::default();
        options.headless = config.headless;
        options.sandbox = config.sandbox;
        options.window_size = Some(config.window_size);
        options.idle_browser_timeout = config.idle_timeout;
        if let Some(path) = &config.chrome_path {
            options.path = Some(path.clone());
        }

        let browser = Browser::new(options).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }
}

impl PageSession for ChromeSession {
    fn navigate(&self, locator: &Locator) -> Result<()> {
        debug!("Navigating to {}", locator);

        self.tab
            .navigate_to(locator.as_str())
            .map_err(|e| ScrapeError::Session(format!("Failed to navigate to {}: {}", locator, e)))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Session(format!("Navigation did not finish: {}", e)))?;

        Ok(())
    }

    fn await_optional_dismiss(&self, selector: &str, timeout: Duration) -> Result<bool> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(button) => {
                button
                    .click()
                    .map_err(|e| ScrapeError::Session(format!("Failed to click '{}': {}", selector, e)))?;
                Ok(true)
            }
            Err(e) if e.downcast_ref::<Timeout>().is_some() => Ok(false),
            Err(e) => Err(ScrapeError::Session(format!(
                "Failed waiting for '{}': {}",
                selector, e
            ))),
        }
    }

    fn page_html(&self) -> Result<String> {
        let result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)
            .map_err(|e| ScrapeError::Session(format!("Failed to read page HTML: {}", e)))?;

        match result.value.as_ref().and_then(|v| v.as_str()) {
            Some(html) => Ok(html.to_string()),
            None => Err(ScrapeError::Session("Page returned no HTML".to_string())),
        }
    }

    fn screenshot_png(&self) -> Result<Option<Vec<u8>>> {
        let png = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| ScrapeError::Session(format!("Failed to capture screenshot: {}", e)))?;

        Ok(Some(png))
    }

    fn close(self) -> Result<()> {
        info!("Closing browser");
        let closed = self
            .tab
            .close(true)
            .map(|_| ())
            .map_err(|e| ScrapeError::Session(format!("Failed to close tab: {}", e)));

        // Dropping the browser kills the Chrome process even if the tab close failed
        drop(self.browser);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::dom::{parse_selector, ResultsPage};
    use crate::scrapers::listing::ListingExtractor;
    use crate::scrapers::query::build_locator;
    use crate::scrapers::types::SearchRequest;
    use chrono::NaiveDate;

    #[test]
    #[ignore] // Requires Chrome to be installed and network access
    fn test_live_results_page() {
        let session = ChromeSession::launch(&BrowserConfig::default()).expect("Failed to launch browser");

        let request = SearchRequest::new(
            "Paris",
            NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 6, 5).unwrap(),
        );
        let locator = build_locator(crate::scrapers::query::DEFAULT_SEARCH_URL, &request).unwrap();

        session.navigate(&locator).expect("Failed to navigate");
        let page = ResultsPage::from_html(&session.page_html().expect("Failed to capture page"));
        let cards = parse_selector(crate::config::DEFAULT_LISTING_SELECTOR).unwrap();
        let extractor = ListingExtractor::new().unwrap();

        for node in page.list_nodes(&cards) {
            println!("{:?}", extractor.extract(&node));
        }

        session.close().expect("Failed to close browser");
    }
}
