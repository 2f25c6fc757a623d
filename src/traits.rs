use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} for tab '{tab}': {body}")]
    Status {
        tab: String,
        status: u16,
        body: String,
    },
    #[error("Invalid tab URL: {0}")]
    InvalidUrl(String),
    #[error("Tab '{0}' not found")]
    NotFound(String),
    #[error("Fetch task failed: {0}")]
    Join(String),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to decode CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[async_trait]
pub trait TabSource: Send + Sync {
    /// Returns a label for the spreadsheet this source reads from.
    fn source_id(&self) -> &str;

    /// Fetches one named tab as CSV text.
    async fn fetch_tab(&self, tab: &str) -> Result<String, FetchError>;
}
