//! In-memory fetcher, for hosts that already hold rendered pages.

use std::collections::HashMap;

use super::DocumentFetcher;
use crate::error::{Error, Result};

/// Serves documents from a map keyed by exact location.
#[derive(Debug, Clone)]
pub struct MemoryFetcher {
    schemes: Vec<&'static str>,
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    /// Create an empty fetcher answering for `schemes`.
    pub fn new(schemes: &[&'static str]) -> Self {
        Self {
            schemes: schemes.to_vec(),
            pages: HashMap::new(),
        }
    }

    /// Add a page.
    pub fn insert(&mut self, location: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(location.into(), html.into());
    }

    /// Add a page, builder style.
    pub fn with_page(mut self, location: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(location, html);
        self
    }
}

impl DocumentFetcher for MemoryFetcher {
    fn name(&self) -> &str {
        "memory"
    }

    fn schemes(&self) -> &[&str] {
        &self.schemes
    }

    fn fetch(&self, location: &str) -> Result<String> {
        self.pages
            .get(location)
            .cloned()
            .ok_or_else(|| Error::unavailable(location, "no such page"))
    }
}
