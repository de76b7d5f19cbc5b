// src/core/fetch.rs

use crate::constants::REMOTE_FETCH_TIMEOUT_SECS;
use std::time::Duration;

/// Retrieves the body of a remote keyed data set.
pub trait DatasetFetcher {
    /// Returns the response body, or a human readable reason for the failure.
    fn fetch(&self, address: &str) -> Result<String, String>;
}

/// Blocking HTTP GET with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(REMOTE_FETCH_TIMEOUT_SECS),
        }
    }
}

impl HttpFetcher {
    /// A fetcher giving up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl DatasetFetcher for HttpFetcher {
    fn fetch(&self, address: &str) -> Result<String, String> {
        log::debug!("Fetching remote data set from '{}' (timeout {:?}).", address, self.timeout);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| e.to_string())?;
        let response = client.get(address).send().map_err(|e| e.to_string())?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(format!("unexpected HTTP status {}", status));
        }
        response.text().map_err(|e| e.to_string())
    }
}
