// src/fetch/session.rs

use reqwest::{Client, Response};
use tokio::time::sleep;
use tracing::{debug, error, warn};
use url::Url;

use super::FetchError;
use crate::config::{Config, RetryPolicy};

/// HTTP client plus the status-based retry policy applied to every GET.
///
/// Only statuses listed in the policy are retried. Connection-level failures
/// surface immediately as [`FetchError::Transport`].
pub struct Session {
    client: Client,
    retry: RetryPolicy,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str());

        if config.insecure_tls {
            debug!(host = ?config.endpoint.host_str(), "TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build().map_err(FetchError::Client)?,
            retry: config.retry.clone(),
        })
    }

    /// GET `url`, retrying on retryable statuses until the policy runs out.
    pub async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        let mut retries = 0;
        loop {
            debug!(%url, attempt = retries + 1, "GET");
            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;

            let status = resp.status();
            if status.is_success() {
                return Ok(resp);
            }
            drop(resp);

            if self.retry.should_retry(status) && retries < self.retry.max_retries {
                retries += 1;
                let delay = self.retry.backoff(retries);
                warn!(%url, %status, attempt = retries, delay_ms = delay.as_millis() as u64, "Retrying");
                sleep(delay).await;
                continue;
            }

            if retries > 0 {
                error!(%url, %status, "Exhausted retries");
            }
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                attempts: retries + 1,
            });
        }
    }
}
