use crate::error::{Result, ScrapeError};
use crate::models::ListingRecord;
use std::path::Path;

pub const CSV_HEADER: [&str; 4] = ["hotel_name", "review_score", "review_count", "price"];

/// Write listings to a CSV file: one header row, then one row per listing.
/// Missing fields are written as empty cells.
pub fn export_csv(records: &[ListingRecord], path: &Path) -> Result<()> {
    let wrap = |source: csv::Error| ScrapeError::Export {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer.write_record(CSV_HEADER).map_err(wrap)?;

    for record in records {
        writer
            .write_record([
                record.hotel_name.clone().unwrap_or_default(),
                record.review_score.map(format_score).unwrap_or_default(),
                record.review_count.map(|c| c.to_string()).unwrap_or_default(),
                record.price.clone().unwrap_or_default(),
            ])
            .map_err(wrap)?;
    }

    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

/// Scores keep one decimal even when whole, so 9 is written as "9.0"
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}
