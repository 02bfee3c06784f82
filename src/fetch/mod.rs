//! Fetching foreign documents by location.
//!
//! A location is either a URL (`https://…`, `file:///…`) or a plain
//! filesystem path. The [`FetcherRegistry`] picks a fetcher by the location's
//! URL scheme; plain paths use the `file` scheme.
//!
//! # Example
//!
//! ```no_run
//! use bitext::fetch::FetcherRegistry;
//!
//! fn main() -> bitext::Result<()> {
//!     let registry = FetcherRegistry::with_defaults();
//!     let html = registry.fetch("pages/de/Katze.html")?;
//!     println!("{} bytes", html.len());
//!     Ok(())
//! }
//! ```

mod file;
mod memory;

pub use file::FileFetcher;
pub use memory::MemoryFetcher;

use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::error::{Error, Result};

/// Trait for document fetchers.
///
/// Implementations map every failure to [`Error::ForeignUnavailable`] so the
/// caller can tell "no alignment possible" apart from other errors.
pub trait DocumentFetcher: Send + Sync {
    /// Get the name of this fetcher.
    fn name(&self) -> &str;

    /// Get the URL schemes this fetcher handles, lowercase (e.g., `["https"]`).
    fn schemes(&self) -> &[&str];

    /// Fetch the HTML at `location`.
    fn fetch(&self, location: &str) -> Result<String>;

    /// Check if this fetcher handles the given scheme.
    fn supports_scheme(&self, scheme: &str) -> bool {
        let scheme = scheme.to_ascii_lowercase();
        self.schemes().iter().any(|s| *s == scheme)
    }
}

/// Scheme of a location, `file` for plain paths.
///
/// Single-letter schemes are Windows drive letters, not URLs.
pub fn scheme_of(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) if url.scheme().len() > 1 => url.scheme().to_string(),
        _ => "file".to_string(),
    }
}

/// Registry for document fetchers, keyed by URL scheme.
pub struct FetcherRegistry {
    by_scheme: HashMap<String, Arc<dyn DocumentFetcher>>,
    by_name: HashMap<String, Arc<dyn DocumentFetcher>>,
}

impl FetcherRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_scheme: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default fetchers (local files).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FileFetcher::new()));
        registry
    }

    /// Register a fetcher for all its schemes.
    ///
    /// A later registration replaces an earlier one for the same scheme.
    pub fn register(&mut self, fetcher: Arc<dyn DocumentFetcher>) {
        for scheme in fetcher.schemes() {
            self.by_scheme
                .insert(scheme.to_ascii_lowercase(), fetcher.clone());
        }
        self.by_name.insert(fetcher.name().to_lowercase(), fetcher);
    }

    /// Get a fetcher by scheme.
    pub fn get_by_scheme(&self, scheme: &str) -> Option<Arc<dyn DocumentFetcher>> {
        self.by_scheme.get(&scheme.to_ascii_lowercase()).cloned()
    }

    /// Get a fetcher by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentFetcher>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a scheme is supported.
    pub fn supports(&self, scheme: &str) -> bool {
        self.by_scheme.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Get all supported schemes.
    pub fn supported_schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.by_scheme.keys().map(|s| s.as_str()).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Fetch `location` with the fetcher registered for its scheme.
    pub fn fetch(&self, location: &str) -> Result<String> {
        let scheme = scheme_of(location);
        let fetcher = self
            .get_by_scheme(&scheme)
            .ok_or_else(|| Error::UnsupportedLocation(location.to_string()))?;

        log::debug!("Fetching {} with {}", location, fetcher.name());
        fetcher.fetch(location)
    }
}

impl Default for FetcherRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DocumentFetcher for FetcherRegistry {
    fn name(&self) -> &str {
        "registry"
    }

    fn schemes(&self) -> &[&str] {
        &[]
    }

    fn fetch(&self, location: &str) -> Result<String> {
        FetcherRegistry::fetch(self, location)
    }

    fn supports_scheme(&self, scheme: &str) -> bool {
        self.supports(scheme)
    }
}
