// src/fetch/payload.rs

use serde_json::Value;
use tracing::{debug, info};

use super::{FetchError, Session};
use crate::{clock::RunStamp, config::Config};

/// Fetch the configured endpoint once and parse the body as JSON.
pub async fn fetch_payload(
    session: &Session,
    config: &Config,
    stamp: &RunStamp,
) -> Result<Value, FetchError> {
    let url = &config.endpoint;
    info!("[{}] connecting to Tainan SOA endpoint", stamp.timestamp());

    let bytes = session
        .get(url)
        .await?
        .bytes()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
    debug!(%url, bytes = bytes.len(), "response body received");

    serde_json::from_slice(&bytes).map_err(|source| FetchError::Json {
        url: url.to_string(),
        source,
    })
}
