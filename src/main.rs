use anyhow::Context;
use booking_scout::config::{BrowserConfig, ScrapeOptions, DEFAULT_CSV_FILE};
use booking_scout::scrapers::query::DEFAULT_SEARCH_URL;
use booking_scout::scrapers::{get_hotel_details, SearchRequest};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scrape hotel listings from a Booking.com search results page
#[derive(Debug, Parser)]
#[command(name = "booking-scout", version)]
struct Cli {
    /// City or destination to search in
    #[arg(long)]
    city: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    checkin: NaiveDate,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    checkout: NaiveDate,

    /// Number of adults
    #[arg(long, default_value_t = 2)]
    adults: u32,

    /// Number of children
    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Number of rooms
    #[arg(long, default_value_t = 1)]
    rooms: u32,

    /// Star ratings to filter on, comma separated (e.g. 4,5)
    #[arg(long, value_delimiter = ',')]
    stars: Vec<u8>,

    #[arg(long, default_value = "USD")]
    currency: String,

    #[arg(long, default_value = "en-us")]
    language: String,

    /// Export the listings to CSV
    #[arg(long)]
    csv: bool,

    /// CSV file written when --csv is set
    #[arg(long, default_value = DEFAULT_CSV_FILE)]
    output: PathBuf,

    /// Also dump the listings as pretty JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Chrome binary to use
    #[arg(long, env = "CHROME_PATH")]
    chrome_path: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Seconds to wait for the sign-in modal
    #[arg(long, default_value_t = 7)]
    dismiss_timeout: u64,

    /// Seconds to wait after navigation before reading the page
    #[arg(long, default_value_t = 0)]
    settle: u64,

    /// Save the page HTML and a screenshot here
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    #[arg(long, env = "BOOKING_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🏨 Booking Scout - hotel search scraper");

    let request = SearchRequest::new(cli.city.clone(), cli.checkin, cli.checkout)
        .with_occupancy(cli.adults, cli.children, cli.rooms)
        .with_stars(cli.stars.iter().copied())
        .with_currency(cli.currency.clone())
        .with_language(cli.language.clone());

    let browser = BrowserConfig {
        headless: !cli.headful,
        chrome_path: cli.chrome_path.clone(),
        sandbox: !cli.no_sandbox,
        ..BrowserConfig::default()
    };

    let options = ScrapeOptions {
        base_url: cli.search_url.clone(),
        dismiss_timeout: Duration::from_secs(cli.dismiss_timeout),
        settle_delay: Duration::from_secs(cli.settle),
        debug_dir: cli.debug_dir.clone(),
        csv_output: cli.csv.then(|| cli.output.clone()),
        ..ScrapeOptions::default()
    };

    info!("Searching {} from {} to {}...", request.city, request.checkin, request.checkout);
    let listings = get_hotel_details(&request, &browser, &options).context("Hotel search failed")?;

    info!("✅ Scraped {} listings", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {}", i + 1, listing.hotel_name.as_deref().unwrap_or("(no name)"));
        if let Some(score) = listing.review_score {
            println!("   Score: {}", score);
        }
        if let Some(count) = listing.review_count {
            println!("   Reviews: {}", count);
        }
        if let Some(price) = &listing.price {
            println!("   Price: {}", price);
        }
        println!();
    }

    if let Some(path) = &cli.json {
        let json = serde_json::to_string_pretty(&listings)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved listings to {}", path.display());
    }

    Ok(())
}
