use std::fmt;

use crate::config::ServiceConfig;
use crate::params::SourceRef;

/// A resolved, fetchable source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSourceUrl(String);

impl CanonicalSourceUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalSourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a [`SourceRef`] into a URL, joining relative paths to the bucket host.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    bucket_host: Option<String>,
}

impl SourceResolver {
    pub fn new(bucket_host: Option<String>) -> Self {
        Self { bucket_host }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.bucket_host.clone())
    }

    pub fn resolve(&self, source: &SourceRef) -> CanonicalSourceUrl {
        match source {
            SourceRef::Relative(path) => {
                // No percent-encoding or normalisation beyond the slash trim.
                let host = self.bucket_host.as_deref().unwrap_or("");
                CanonicalSourceUrl(format!(
                    "{}/{}",
                    host.trim_end_matches('/'),
                    path.trim_start_matches('/')
                ))
            }
            SourceRef::Absolute(url) => CanonicalSourceUrl(url.clone()),
        }
    }
}
