//! Local file fetcher.

use std::path::{Path, PathBuf};

use url::Url;

use super::DocumentFetcher;
use crate::error::{Error, Result};

/// Reads documents from the filesystem.
///
/// Accepts plain paths and `file://` URLs. Relative paths are resolved
/// against the base directory when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    /// Create a fetcher resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Filesystem path for a location.
    pub fn resolve(&self, location: &str) -> Result<PathBuf> {
        let path = if location.starts_with("file:") {
            let url = Url::parse(location).map_err(|e| Error::unavailable(location, e))?;
            url.to_file_path()
                .map_err(|_| Error::unavailable(location, "not a local file URL"))?
        } else {
            PathBuf::from(location)
        };

        Ok(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        })
    }

    /// Read a document asynchronously.
    #[cfg(feature = "async")]
    pub async fn fetch_async(&self, location: &str) -> Result<String> {
        let path = self.resolve(location)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::unavailable(location, e))
    }

    fn read(&self, location: &str, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| Error::unavailable(location, e))
    }
}

impl DocumentFetcher for FileFetcher {
    fn name(&self) -> &str {
        "file"
    }

    fn schemes(&self) -> &[&str] {
        &["file"]
    }

    fn fetch(&self, location: &str) -> Result<String> {
        let path = self.resolve(location)?;
        self.read(location, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_fetcher_name() {
        let fetcher = FileFetcher::new();
        assert_eq!(fetcher.name(), "file");
        assert!(fetcher.supports_scheme("FILE"));
        assert!(!fetcher.supports_scheme("https"));
    }

    #[test]
    fn test_base_dir_applies_to_relative_paths() {
        let fetcher = FileFetcher::new().with_base_dir("/srv/pages");
        assert_eq!(
            fetcher.resolve("de/Katze.html").unwrap(),
            PathBuf::from("/srv/pages/de/Katze.html")
        );
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = FileFetcher::new()
            .fetch("/definitely/not/here.html")
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
