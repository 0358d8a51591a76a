// src/config.rs

use reqwest::StatusCode;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Tainan SOA parking-lot endpoint.
pub const TAINAN_PARKING_URL: &str =
    "https://soa.tainan.gov.tw/Api/Service/Get/91073f40-d251-42cc-9f4c-88e8937c9911";

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_FILE_PREFIX: &str = "Tainan_North_Parking_";

/// Matched literally against `district` and `address`.
pub const NORTH_DISTRICT_MARKER: &str = "北區";

/// Matched case-insensitively against `address` only.
pub const NORTH_LATIN_MARKER: &str = "north";

/// Status-based retry for the single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff_base * 2^(n-1)`.
    pub backoff_base: Duration,
    pub retry_statuses: Vec<StatusCode>,
}

impl RetryPolicy {
    pub fn should_retry(&self, status: StatusCode) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Backoff before the `attempt`-th retry (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.backoff_base * 2u32.pow(exp)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            retry_statuses: vec![
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }
}

/// Everything a run needs, passed explicitly into each stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub user_agent: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Skip TLS certificate verification. Only for hosts known to serve a broken chain.
    pub insecure_tls: bool,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub district_marker: String,
    pub latin_marker: String,
}

impl Config {
    /// Production settings: the Tainan endpoint, whose certificate chain does not verify.
    pub fn tainan_north() -> Self {
        Self {
            insecure_tls: true,
            ..Self::default()
        }
    }

    /// Same settings pointed at another endpoint, e.g. a local fixture server.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(TAINAN_PARKING_URL).expect("endpoint constant should parse"),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            insecure_tls: false,
            output_dir: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            district_marker: NORTH_DISTRICT_MARKER.to_string(),
            latin_marker: NORTH_LATIN_MARKER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn only_gateway_and_server_errors_retry() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(StatusCode::SERVICE_UNAVAILABLE));
        assert!(policy.should_retry(StatusCode::GATEWAY_TIMEOUT));
        assert!(!policy.should_retry(StatusCode::NOT_FOUND));
        assert!(!policy.should_retry(StatusCode::NOT_IMPLEMENTED));
    }

    #[test]
    fn insecure_transport_only_for_production_host() {
        assert!(!Config::default().insecure_tls);
        assert!(Config::tainan_north().insecure_tls);
        assert_eq!(Config::tainan_north().timeout, Duration::from_secs(30));
    }
}
