use crate::scrapers::query::DEFAULT_SEARCH_URL;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LISTING_SELECTOR: &str = r#"[data-testid="property-card"]"#;
pub const DEFAULT_DISMISS_SELECTOR: &str =
    r#"[role="dialog"] button[aria-label="Dismiss sign-in info."]"#;
pub const DEFAULT_CSV_FILE: &str = "properties.csv";

/// How the Chrome process is launched
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    /// Chrome binary to use instead of the auto-detected one
    pub chrome_path: Option<PathBuf>,
    pub window_size: (u32, u32),
    pub sandbox: bool,
    /// Browser is shut down after this long without any CDP traffic
    pub idle_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            window_size: (1920, 1080),
            sandbox: true,
            idle_timeout: Duration::from_secs(60),
        }
    }
}

/// Options for one scrape of a results page
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub base_url: String,
    pub listing_selector: String,
    pub dismiss_selector: String,
    /// How long to wait for the sign-in overlay before moving on
    pub dismiss_timeout: Duration,
    /// Extra wait after navigation for client-side rendering
    pub settle_delay: Duration,
    /// Where to save the page HTML and a screenshot, if anywhere
    pub debug_dir: Option<PathBuf>,
    /// CSV destination. `None` disables the export.
    pub csv_output: Option<PathBuf>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            listing_selector: DEFAULT_LISTING_SELECTOR.to_string(),
            dismiss_selector: DEFAULT_DISMISS_SELECTOR.to_string(),
            dismiss_timeout: Duration::from_secs(7),
            settle_delay: Duration::ZERO,
            debug_dir: None,
            csv_output: None,
        }
    }
}
