//! Language metadata: display names and script direction by language code.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Direction, Language};

/// Resolves a language code to its metadata.
pub trait LanguageResolver: Send + Sync {
    /// Look up `code`. Codes are matched ASCII case-insensitively.
    fn resolve(&self, code: &str) -> Option<Language>;

    /// Look up `code`, failing with [`Error::UnknownLanguage`].
    fn require(&self, code: &str) -> Result<Language> {
        self.resolve(code)
            .ok_or_else(|| Error::UnknownLanguage(code.to_string()))
    }

    /// Look up `code`, falling back to the code itself as display name and a
    /// left-to-right direction.
    fn resolve_or_default(&self, code: &str) -> Language {
        self.resolve(code)
            .unwrap_or_else(|| Language::new(code, code, Direction::Ltr))
    }

    /// Look up `code` for the page `html`; unknown codes take their
    /// direction from the page text.
    fn resolve_for_page(&self, code: &str, html: &str) -> Language {
        self.resolve(code)
            .unwrap_or_else(|| Language::new(code, code, Direction::detect(html)))
    }
}

// (code, autonym, right-to-left)
const BUILTIN: &[(&str, &str, bool)] = &[
    ("af", "Afrikaans", false),
    ("ar", "العربية", true),
    ("arz", "مصرى", true),
    ("az", "Azərbaycanca", false),
    ("be", "Беларуская", false),
    ("bg", "Български", false),
    ("bn", "বাংলা", false),
    ("ca", "Català", false),
    ("ckb", "کوردی", true),
    ("cs", "Čeština", false),
    ("cy", "Cymraeg", false),
    ("da", "Dansk", false),
    ("de", "Deutsch", false),
    ("dv", "ދިވެހިބަސް", true),
    ("el", "Ελληνικά", false),
    ("en", "English", false),
    ("eo", "Esperanto", false),
    ("es", "Español", false),
    ("et", "Eesti", false),
    ("eu", "Euskara", false),
    ("fa", "فارسی", true),
    ("fi", "Suomi", false),
    ("fr", "Français", false),
    ("ga", "Gaeilge", false),
    ("gl", "Galego", false),
    ("he", "עברית", true),
    ("hi", "हिन्दी", false),
    ("hr", "Hrvatski", false),
    ("hu", "Magyar", false),
    ("hy", "Հայերեն", false),
    ("id", "Bahasa Indonesia", false),
    ("is", "Íslenska", false),
    ("it", "Italiano", false),
    ("ja", "日本語", false),
    ("ka", "ქართული", false),
    ("kk", "Қазақша", false),
    ("ko", "한국어", false),
    ("la", "Latina", false),
    ("lt", "Lietuvių", false),
    ("lv", "Latviešu", false),
    ("mk", "Македонски", false),
    ("ms", "Bahasa Melayu", false),
    ("nl", "Nederlands", false),
    ("nn", "Norsk nynorsk", false),
    ("no", "Norsk bokmål", false),
    ("pl", "Polski", false),
    ("ps", "پښتو", true),
    ("pt", "Português", false),
    ("ro", "Română", false),
    ("ru", "Русский", false),
    ("sd", "سنڌي", true),
    ("sk", "Slovenčina", false),
    ("sl", "Slovenščina", false),
    ("sq", "Shqip", false),
    ("sr", "Српски / srpski", false),
    ("sv", "Svenska", false),
    ("sw", "Kiswahili", false),
    ("ta", "தமிழ்", false),
    ("th", "ไทย", false),
    ("tr", "Türkçe", false),
    ("ug", "ئۇيغۇرچە", true),
    ("uk", "Українська", false),
    ("ur", "اردو", true),
    ("uz", "Oʻzbekcha", false),
    ("vi", "Tiếng Việt", false),
    ("yi", "ייִדיש", true),
    ("zh", "中文", false),
];

/// Built-in table of common wiki languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLanguages;

impl BuiltinLanguages {
    /// Create the resolver.
    pub fn new() -> Self {
        Self
    }

    /// All known codes, in table order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(code, _, _)| *code)
    }
}

impl LanguageResolver for BuiltinLanguages {
    fn resolve(&self, code: &str) -> Option<Language> {
        BUILTIN
            .iter()
            .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
            .map(|(c, name, rtl)| {
                let direction = if *rtl { Direction::Rtl } else { Direction::Ltr };
                Language::new(*c, *name, direction)
            })
    }
}

/// Caller-supplied languages, keyed by lowercase code.
///
/// Entries shadow the built-in table when chained with [`with_fallback`].
///
/// [`with_fallback`]: LanguageTable::with_fallback
pub struct LanguageTable {
    entries: HashMap<String, Language>,
    fallback: Option<Box<dyn LanguageResolver>>,
}

impl LanguageTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: None,
        }
    }

    /// Consult `resolver` for codes the table does not hold.
    pub fn with_fallback<R: LanguageResolver + 'static>(mut self, resolver: R) -> Self {
        self.fallback = Some(Box::new(resolver));
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, language: Language) {
        self.entries
            .insert(language.code.to_ascii_lowercase(), language);
    }

    /// Add an entry, builder style.
    pub fn with_language(mut self, language: Language) -> Self {
        self.insert(language);
        self
    }

    /// Number of entries, not counting the fallback.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries of its own.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageResolver for LanguageTable {
    fn resolve(&self, code: &str) -> Option<Language> {
        self.entries
            .get(&code.to_ascii_lowercase())
            .cloned()
            .or_else(|| self.fallback.as_ref().and_then(|f| f.resolve(code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let languages = BuiltinLanguages::new();
        let de = languages.resolve("de").unwrap();
        assert_eq!(de.name, "Deutsch");
        assert_eq!(de.direction, Direction::Ltr);

        let he = languages.resolve("HE").unwrap();
        assert_eq!(he.code, "he");
        assert_eq!(he.direction, Direction::Rtl);
    }

    #[test]
    fn test_builtin_codes_are_sorted_and_unique() {
        let codes: Vec<_> = BuiltinLanguages.codes().collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_unknown_language() {
        let languages = BuiltinLanguages::new();
        assert!(languages.resolve("xx-nope").is_none());
        assert!(matches!(
            languages.require("xx-nope"),
            Err(Error::UnknownLanguage(code)) if code == "xx-nope"
        ));

        let fallback = languages.resolve_or_default("tlh");
        assert_eq!(fallback.name, "tlh");
        assert_eq!(fallback.direction, Direction::Ltr);
    }

    #[test]
    fn test_unknown_code_direction_from_page() {
        let languages = BuiltinLanguages::new();
        let guessed = languages.resolve_for_page("syc", "<p>ܫܠܡܐ ܥܠܡܐ</p>");
        assert_eq!(guessed.name, "syc");
        assert_eq!(guessed.direction, Direction::Rtl);

        // Known codes ignore the page.
        let known = languages.resolve_for_page("he", "<p>plain latin</p>");
        assert_eq!(known.direction, Direction::Rtl);
    }

    #[test]
    fn test_table_shadows_fallback() {
        let table = LanguageTable::new()
            .with_language(Language::new("en", "English (wiki)", Direction::Ltr))
            .with_fallback(BuiltinLanguages);

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("EN").unwrap().name, "English (wiki)");
        assert_eq!(table.resolve("fa").unwrap().direction, Direction::Rtl);
        assert!(table.resolve("zz").is_none());
    }
}
