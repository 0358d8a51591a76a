// src/fetch/mod.rs

use reqwest::StatusCode;
use thiserror::Error;

pub mod payload;
pub mod session;

pub use payload::fetch_payload;
pub use session::Session;

/// Everything that can go wrong between building the client and holding parsed JSON.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned {status} after {attempts} attempt(s)")]
    Status {
        url: String,
        status: StatusCode,
        attempts: u32,
    },

    #[error("response from {url} is not valid JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Parse failures are reported separately from network failures.
    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Json { .. })
    }
}
