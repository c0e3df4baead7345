use std::path::PathBuf;
use std::time::Duration;

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Dataset description
// ---------------------------------------------------------------------------

/// A remote dataset: where to fetch it and where it lives in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSource {
    /// `owner/name` handle, also the cache sub-directory.
    pub handle: &'static str,
    /// File name of the CSV inside the dataset directory.
    pub file_name: &'static str,
    /// Direct download URL of the CSV.
    pub url: &'static str,
}

pub const TITANIC: DatasetSource = DatasetSource {
    handle: "yasserh/titanic-dataset",
    file_name: "Titanic-Dataset.csv",
    url: "https://raw.githubusercontent.com/datasciencedojo/datasets/master/titanic.csv",
};

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

const APP_NAME: &str = "titanic-survival";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Built-in settings. Nothing here is read from the command line or a file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: DatasetSource,
    /// Overrides the platform cache directory when set.
    pub cache_dir: Option<PathBuf>,
    pub request_timeout: Duration,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: TITANIC,
            cache_dir: None,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            window_size: [1000.0, 700.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl AppConfig {
    /// Root of the dataset cache: the override, or the per-user cache
    /// directory of this application.
    pub fn cache_root(&self) -> Result<PathBuf, DatasetError> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .ok_or(DatasetError::NoCacheDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_platform_cache() {
        let config = AppConfig {
            cache_dir: Some(PathBuf::from("/tmp/titanic-cache")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.cache_root().unwrap(),
            PathBuf::from("/tmp/titanic-cache")
        );
    }

    #[test]
    fn default_targets_titanic_csv() {
        let config = AppConfig::default();
        assert_eq!(config.dataset.file_name, "Titanic-Dataset.csv");
        assert!(config.dataset.url.starts_with("https://"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
