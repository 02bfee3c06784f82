//! Link and fragment-id rewriting for the merged view.
//!
//! Both pages end up in one document, so their fragment ids are moved into
//! disjoint namespaces and in-page links follow them. Local root-relative
//! links also carry the activation parameter so that following them keeps
//! the bilingual view on.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use url::form_urlencoded;

use super::AlignOptions;

fn start_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<[A-Za-z](?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid start tag pattern"))
}

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(\sid\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).expect("valid id pattern")
    })
}

fn href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(\shref\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).expect("valid href pattern")
    })
}

/// Rewrites `id` and `href` attribute values; nothing else is touched.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    local_prefix: String,
    foreign_prefix: String,
    match_param: String,
}

impl LinkRewriter {
    /// Create a rewriter with explicit prefixes and parameter name.
    pub fn new(
        local_prefix: impl Into<String>,
        foreign_prefix: impl Into<String>,
        match_param: impl Into<String>,
    ) -> Self {
        Self {
            local_prefix: local_prefix.into(),
            foreign_prefix: foreign_prefix.into(),
            match_param: match_param.into(),
        }
    }

    /// Create a rewriter from align options.
    pub fn from_options(options: &AlignOptions) -> Self {
        Self::new(
            options.local_prefix.clone(),
            options.foreign_prefix.clone(),
            options.match_param.clone(),
        )
    }

    /// Rewrite the local page: prefix its ids and in-page links, and add the
    /// match parameter for `foreign_code` to root-relative links.
    pub fn rewrite_local(&self, html: &str, foreign_code: &str) -> String {
        let prefixed = prefix_fragments(html, &self.local_prefix);
        add_match_param(&prefixed, &self.match_param, foreign_code)
    }

    /// Rewrite the foreign page: prefix its ids and in-page links.
    pub fn rewrite_foreign(&self, html: &str) -> String {
        prefix_fragments(html, &self.foreign_prefix)
    }
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::from_options(&AlignOptions::default())
    }
}

/// Prefix every `id` value and every `href="#..."` target with `prefix`.
///
/// Values already carrying the prefix are left alone, so applying this twice
/// gives the same result as applying it once.
pub fn prefix_fragments(html: &str, prefix: &str) -> String {
    rewrite_start_tags(html, |tag| {
        let with_id = id_regex().replace_all(tag, |caps: &Captures| {
            rewrite_attr(caps, |value| {
                if value.is_empty() || value.starts_with(prefix) {
                    None
                } else {
                    Some(format!("{}{}", prefix, value))
                }
            })
        });
        href_regex()
            .replace_all(&with_id, |caps: &Captures| {
                rewrite_attr(caps, |value| {
                    let target = value.strip_prefix('#')?;
                    if target.is_empty() || target.starts_with(prefix) {
                        None
                    } else {
                        Some(format!("#{}{}", prefix, target))
                    }
                })
            })
            .into_owned()
    })
}

/// Append `param=code` to root-relative links without a query string.
///
/// Protocol-relative links (`//host/...`) are external and left alone. A
/// fragment stays at the end: `/Page#Intro` becomes `/Page?match=de#Intro`.
pub fn add_match_param(html: &str, param: &str, code: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair(param, code)
        .finish();

    rewrite_start_tags(html, |tag| {
        href_regex()
            .replace_all(tag, |caps: &Captures| {
                rewrite_attr(caps, |value| {
                    if !value.starts_with('/') || value.starts_with("//") || value.contains('?') {
                        return None;
                    }
                    Some(match value.split_once('#') {
                        Some((path, fragment)) => format!("{}?{}#{}", path, query, fragment),
                        None => format!("{}?{}", value, query),
                    })
                })
            })
            .into_owned()
    })
}

/// Apply `f` to every start tag, leaving text content and end tags alone.
fn rewrite_start_tags<F>(html: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    start_tag_regex()
        .replace_all(html, |caps: &Captures| f(&caps[0]))
        .into_owned()
}

/// Rebuild one matched attribute, keeping its quote style.
fn rewrite_attr<F>(caps: &Captures<'_>, f: F) -> String
where
    F: FnOnce(&str) -> Option<String>,
{
    let lead = &caps[1];
    let (quote, value) = match (caps.get(2), caps.get(3)) {
        (Some(v), _) => ('"', v.as_str()),
        (None, Some(v)) => ('\'', v.as_str()),
        (None, None) => ('"', ""),
    };
    let value: Cow<'_, str> = match f(value) {
        Some(new) => Cow::Owned(new),
        None => Cow::Borrowed(value),
    };
    format!("{}{}{}{}", lead, quote, value, quote)
}
