use thiserror::Error;

/// Errors that can occur outside the pure recipe core
#[derive(Error, Debug)]
pub enum DadlyError {
    /// Failed to reach the recipe API
    #[error("Failed to fetch from API: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Failed to decode a JSON payload
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Failed to read an input file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A value supplied by the caller could not be understood
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
