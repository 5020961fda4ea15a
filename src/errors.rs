// Error types for the feed client and configuration layer
//
// Nothing in the tracking core is fatal; these errors surface at the
// ingestion and configuration boundaries only.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RadarError>;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("HTTP error {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
