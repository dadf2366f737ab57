use thiserror::Error;

use crate::domain::ProviderKind;

#[derive(Error, Debug)]
pub enum NewswireError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} returned an error: {message}", provider.display_name())]
    Provider {
        provider: ProviderKind,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Aggregation failed: {0}")]
    Aggregation(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NewswireError>;
