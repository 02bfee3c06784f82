//! Turning the bilingual view on from a request.
//!
//! A page is shown side by side with a translation only when the request's
//! query string names the translation's language, e.g. `?match=de`. Without
//! it the page is served as usual, minus its hidden hint blocks.

use std::sync::Arc;

use url::form_urlencoded;

use crate::cache::{AlignmentCache, CacheKey};
use crate::error::{Error, Result};
use crate::fetch::DocumentFetcher;
use crate::language::{BuiltinLanguages, LanguageResolver};
use crate::model::Document;
use crate::parser::AlignmentHintParser;
use crate::Bitext;

/// Longest accepted language code.
pub const MAX_CODE_LEN: usize = 16;

/// Check that `code` looks like a language code: 1 to 16 ASCII letters,
/// digits or hyphens.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Read the requested foreign language from a query string.
///
/// A leading `?` is allowed. Returns `Ok(None)` when the parameter is absent
/// or empty, and [`Error::InvalidQuery`] when its value is not a language
/// code. The first occurrence of the parameter wins.
pub fn requested_language(query: &str, param: &str) -> Result<Option<String>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let Some((_, value)) = form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == param)
    else {
        return Ok(None);
    };

    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if !is_valid_code(value) {
        return Err(Error::InvalidQuery(format!(
            "'{}' is not a language code",
            value
        )));
    }
    Ok(Some(value.to_string()))
}

/// Serves a local page, bilingual when the request asks for it.
///
/// Rendered tables are cached by `(local language, foreign location)` when a
/// cache is attached.
pub struct BilingualView {
    bitext: Bitext,
    resolver: Arc<dyn LanguageResolver>,
    cache: Option<Arc<AlignmentCache>>,
}

impl BilingualView {
    /// Create a view with built-in language metadata and no cache.
    pub fn new(bitext: Bitext) -> Self {
        Self {
            bitext,
            resolver: Arc::new(BuiltinLanguages),
            cache: None,
        }
    }

    /// Use `resolver` for foreign language names and directions.
    pub fn with_resolver(mut self, resolver: Arc<dyn LanguageResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Cache rendered tables.
    pub fn with_cache(mut self, cache: Arc<AlignmentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attached cache, if any.
    pub fn cache(&self) -> Option<&AlignmentCache> {
        self.cache.as_deref()
    }

    /// Render `local` for a request with the given query string.
    ///
    /// `locate` maps the requested language code to the location of the
    /// foreign page (its interlanguage link). When the view is not
    /// activated, or asks for the local page's own language, the local HTML
    /// is returned with hint blocks removed. A missing interlanguage link or
    /// a failed fetch is [`Error::ForeignUnavailable`].
    pub fn render<L>(
        &self,
        local: &Document,
        query: &str,
        fetcher: &dyn DocumentFetcher,
        locate: L,
    ) -> Result<String>
    where
        L: FnOnce(&str) -> Option<String>,
    {
        let options = self.bitext.align_options();
        let code = match requested_language(query, &options.match_param)? {
            Some(code) if !code.eq_ignore_ascii_case(&local.language_code) => code,
            _ => {
                let parser = AlignmentHintParser::new(options.hint_class.as_str());
                return Ok(parser.strip(&local.html));
            }
        };

        let location =
            locate(&code).ok_or_else(|| Error::unavailable(&code, "no page in that language"))?;

        let compute = || {
            let html = fetcher.fetch(&location)?;
            let language = self.resolver.resolve_for_page(&code, &html);
            let foreign = Document::new(html, code.as_str())
                .with_language(&language)
                .with_canonical_url(location.as_str());
            Ok(self.bitext.render(local, &foreign))
        };

        match &self.cache {
            Some(cache) => {
                let key = CacheKey::new(local.language_code.as_str(), location.as_str());
                cache.get_or_compute(&key, compute)
            }
            None => compute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_language() {
        assert_eq!(
            requested_language("?match=de", "match").unwrap(),
            Some("de".to_string())
        );
        assert_eq!(
            requested_language("title=Cat&match=zh-hans", "match").unwrap(),
            Some("zh-hans".to_string())
        );
        assert_eq!(requested_language("title=Cat", "match").unwrap(), None);
        assert_eq!(requested_language("match=", "match").unwrap(), None);
        assert_eq!(requested_language("", "match").unwrap(), None);
    }

    #[test]
    fn test_invalid_codes_are_rejected() {
        assert!(matches!(
            requested_language("match=%3Cscript%3E", "match"),
            Err(Error::InvalidQuery(_))
        ));
        assert!(requested_language("match=abcdefghijklmnopq", "match").is_err());
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("en"));
        assert!(is_valid_code("be-tarask"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("en us"));
        assert!(!is_valid_code("ü"));
    }
}
