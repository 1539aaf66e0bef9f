use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::{ProcessingError, TransformError};
use crate::fetch::HttpFetcher;
use crate::format::{content_type, Codec};
use crate::negotiate::negotiate;
use crate::params::{RawRequestParams, ValidatedRequest};
use crate::processor::{ImageProcessor, RasterProcessor};
use crate::source::SourceResolver;
use crate::transform::TransformSpec;

/// Encoded result of one request.
#[derive(Debug, Clone)]
pub struct TransformedImage {
    pub codec: Codec,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Validate → resolve → fetch → negotiate → build spec → process → map type.
///
/// Holds only read-only state, so one instance is shared by all requests.
pub struct Pipeline {
    resolver: SourceResolver,
    fetcher: HttpFetcher,
    processor: Arc<dyn ImageProcessor>,
}

impl Pipeline {
    pub fn new(resolver: SourceResolver, fetcher: HttpFetcher) -> Self {
        Self {
            resolver,
            fetcher,
            processor: Arc::new(RasterProcessor),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            SourceResolver::from_config(config),
            HttpFetcher::from_config(config)?,
        ))
    }

    pub fn with_processor(mut self, processor: Arc<dyn ImageProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub async fn run(&self, raw: &RawRequestParams) -> Result<TransformedImage, TransformError> {
        let request = ValidatedRequest::from_raw(raw)?;
        let url = self.resolver.resolve(&request.source);
        log::debug!("Resolved {:?} to {url}", request.source);

        let source = self.fetcher.fetch(&url).await?;

        let codec = negotiate(&request.format, raw.accept.as_deref());
        let spec = TransformSpec::build(&request, codec);

        let processor = Arc::clone(&self.processor);
        let body = tokio::task::spawn_blocking(move || processor.process(&source, &spec))
            .await
            .map_err(|e| ProcessingError::Worker(e.to_string()))??;

        Ok(TransformedImage {
            codec,
            content_type: content_type(codec.image_format()),
            body,
        })
    }
}
