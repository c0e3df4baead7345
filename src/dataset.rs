use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DatasetSource;
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// HTTP client abstraction
// ---------------------------------------------------------------------------

/// Fetches a URL's body. Swapped for an in-memory fake in tests.
pub trait HttpClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DatasetError>;
}

/// Blocking `reqwest` client with a request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    timeout: Duration,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl HttpClient for ReqwestClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
        let fetch_err = |reason: String| DatasetError::Fetch {
            url: url.to_string(),
            reason,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| fetch_err(format!("cannot create HTTP client: {e}")))?;

        let response = client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                fetch_err(format!("timed out after {}s", self.timeout.as_secs()))
            } else if e.is_connect() {
                fetch_err("connection failed".to_string())
            } else {
                fetch_err(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {status}")));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| fetch_err(format!("reading body: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Dataset provider
// ---------------------------------------------------------------------------

/// Resolves a dataset to a local directory containing its file.
pub trait DatasetProvider {
    fn resolve(&self, dataset: &DatasetSource) -> Result<PathBuf, DatasetError>;
}

/// Downloads datasets once into `<root>/<handle>/` and reuses them afterwards.
#[derive(Debug)]
pub struct CachedProvider<C> {
    root: PathBuf,
    client: C,
}

impl<C: HttpClient> CachedProvider<C> {
    pub fn new(root: PathBuf, client: C) -> Self {
        Self { root, client }
    }

    /// Directory a dataset is cached in.
    pub fn dataset_dir(&self, dataset: &DatasetSource) -> PathBuf {
        dataset
            .handle
            .split('/')
            .fold(self.root.clone(), |dir, part| dir.join(part))
    }
}

impl<C: HttpClient> DatasetProvider for CachedProvider<C> {
    fn resolve(&self, dataset: &DatasetSource) -> Result<PathBuf, DatasetError> {
        let dir = self.dataset_dir(dataset);
        let target = dir.join(dataset.file_name);

        if is_cached(&target) {
            log::debug!("Using cached {}", target.display());
            return Ok(dir);
        }

        if !is_remote_url(dataset.url) {
            return Err(DatasetError::InvalidUrl(dataset.url.to_string()));
        }

        log::info!("Downloading {} from {}", dataset.handle, dataset.url);
        let body = self.client.get_bytes(dataset.url)?;
        if body.is_empty() {
            return Err(DatasetError::EmptyDownload(dataset.url.to_string()));
        }

        write_atomically(&target, &body)?;
        log::info!("Cached {} bytes at {}", body.len(), target.display());
        Ok(dir)
    }
}

/// Check if a string is a valid remote URL (http:// or https://).
pub fn is_remote_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn is_cached(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

/// Write to a `.part` sibling, then rename into place so an interrupted
/// download never looks like a cached file.
fn write_atomically(target: &Path, body: &[u8]) -> Result<(), DatasetError> {
    let cache_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| DatasetError::Cache { path, source }
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(cache_err(parent))?;
    }

    let partial = target.with_extension("part");
    if partial.exists() {
        log::warn!("Removing stale partial download {}", partial.display());
        fs::remove_file(&partial).map_err(cache_err(&partial))?;
    }
    fs::write(&partial, body).map_err(cache_err(&partial))?;
    fs::rename(&partial, target).map_err(|e| {
        if let Err(cleanup) = fs::remove_file(&partial) {
            log::warn!("Could not remove {}: {cleanup}", partial.display());
        }
        cache_err(target)(e)
    })
}
