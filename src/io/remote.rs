use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::io::IoError;

/// Default per-request timeout for remote documents.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP GET client for remote documents.
///
/// The client keeps no idle connections, so every request's connection is
/// released once its response has been consumed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, IoError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(IoError::Client)?;
        Ok(Self { client })
    }

    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, IoError> {
        let response = self.client.get(url).send().map_err(|source| IoError::Http {
            reference: url.to_string(),
            source,
        })?;

        let status = response.status();
        tracing::debug!(url, %status, "remote document responded");
        if status != StatusCode::OK {
            return Err(IoError::Status {
                reference: url.to_string(),
                status,
            });
        }

        let body = response.bytes().map_err(|source| IoError::Http {
            reference: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}
