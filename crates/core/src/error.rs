use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Extraction cancelled")]
    Cancelled,

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
