//! Adapter construction errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
