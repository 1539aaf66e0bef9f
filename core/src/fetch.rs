use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};

use crate::config::ServiceConfig;
use crate::error::TransformError;
use crate::source::CanonicalSourceUrl;

/// Single-attempt HTTP GET of a source image.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.fetch_timeout)
    }

    /// Fetch the whole body. Only a `200 OK` counts as success.
    pub async fn fetch(&self, url: &CanonicalSourceUrl) -> Result<Bytes, TransformError> {
        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            log::debug!("fetch {url} failed: {e}");
            TransformError::SourceFetchFailed
        })?;

        if response.status() != StatusCode::OK {
            log::debug!("fetch {url} returned {}", response.status());
            return Err(TransformError::SourceFetchFailed);
        }

        let body = response.bytes().await.map_err(|e| {
            log::debug!("reading body of {url} failed: {e}");
            TransformError::SourceReadFailed
        })?;

        log::debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}
