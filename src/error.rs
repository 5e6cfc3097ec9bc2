use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a search, driving the browser or exporting results.
///
/// Missing elements inside a listing are not errors; they surface as `None`
/// fields on the record.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Browser session fault: {0}")]
    Session(String),

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Failed to export results to {}: {}", path.display(), source)]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
