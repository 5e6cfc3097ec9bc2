use crate::error::Result;
use crate::scrapers::query::Locator;
use std::time::Duration;

/// A browser page the search pipeline can drive.
/// Lets the pipeline run against headless Chrome or an in-memory page in tests.
pub trait PageSession {
    /// Load the given results page
    fn navigate(&self, locator: &Locator) -> Result<()>;

    /// Wait up to `timeout` for an overlay matching `selector` and click it away.
    ///
    /// Returns `Ok(false)` when the overlay never showed up.
    fn await_optional_dismiss(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Serialized HTML of the rendered page
    fn page_html(&self) -> Result<String>;

    /// PNG screenshot of the current page, if the session can take one
    fn screenshot_png(&self) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    /// Release the session. Called exactly once, on every exit path.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}
