use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use imgopt_core::fetch::HttpFetcher;
use imgopt_core::params::SourceRef;
use imgopt_core::source::SourceResolver;

use crate::error::CliError;

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load source bytes from disk, or over HTTP for URLs.
pub async fn load_source(source: &str, timeout: Option<Duration>) -> Result<Vec<u8>> {
    if !is_remote(source) {
        return Ok(read_file(Path::new(source))?);
    }

    let fetcher = HttpFetcher::new(timeout).map_err(|e| CliError::Client(e.to_string()))?;
    let url = SourceResolver::default().resolve(&SourceRef::Absolute(source.to_string()));
    let body = fetcher
        .fetch(&url)
        .await
        .with_context(|| format!("Failed to download {source}"))?;
    Ok(body.to_vec())
}

/// Read file contents.
pub fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|e| CliError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write file contents, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::WriteFile {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, data).map_err(|e| CliError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
