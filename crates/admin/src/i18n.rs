//! Localization for the admin panel.
//!
//! Translations are Fluent (`.ftl`) files under `crates/admin/locales/`,
//! embedded into the binary at compile time. A [`Catalog`] is built once at
//! startup and shared through `AppState`; each request gets a cheap
//! [`Translator`] bound to the browser's active [`Language`].
//!
//! Lookups fall back from the active language to English and finally to the
//! key itself, so a missing translation never breaks a page.

use std::collections::HashMap;
use std::sync::Arc;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use hadawi_core::{Direction, Language};

/// Language whose catalog backs every other catalog.
pub const FALLBACK_LANGUAGE: Language = Language::En;

#[derive(RustEmbed)]
#[folder = "locales/"]
#[include = "*.ftl"]
struct Locales;

/// Errors raised while loading the translation catalogs.
#[derive(Debug, Error)]
pub enum I18nError {
    /// No `.ftl` file exists for a supported language.
    #[error("missing catalog for language '{0}'")]
    MissingCatalog(&'static str),

    /// A catalog file is not valid UTF-8.
    #[error("catalog '{0}' is not valid UTF-8")]
    Encoding(&'static str),

    /// A catalog file failed to parse.
    #[error("catalog '{language}' has {count} syntax error(s), first: {first}")]
    Syntax {
        language: &'static str,
        count: usize,
        first: String,
    },

    /// A catalog defines the same message twice.
    #[error("catalog '{language}' has duplicate messages: {detail}")]
    Duplicate {
        language: &'static str,
        detail: String,
    },

    /// A language code could not be turned into a language identifier.
    #[error("invalid language identifier '{0}'")]
    LanguageId(&'static str),
}

/// All translation bundles, one per supported language.
pub struct Catalog {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl Catalog {
    /// Load and parse the embedded catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if any supported language has no catalog or its
    /// catalog fails to parse.
    pub fn load() -> Result<Self, I18nError> {
        let mut sources = Vec::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            let code = language.code();
            let file = Locales::get(&format!("{code}.ftl")).ok_or(I18nError::MissingCatalog(code))?;
            let source = String::from_utf8(file.data.into_owned())
                .map_err(|_| I18nError::Encoding(code))?;
            sources.push((language, source));
        }

        let catalog = Self::from_sources(sources)?;
        tracing::debug!(languages = catalog.bundles.len(), "Translation catalogs loaded");
        Ok(catalog)
    }

    /// Build a catalog from Fluent sources already in memory.
    pub(crate) fn from_sources(
        sources: impl IntoIterator<Item = (Language, String)>,
    ) -> Result<Self, I18nError> {
        let bundles = sources
            .into_iter()
            .map(|(language, source)| Ok((language, build_bundle(language, source)?)))
            .collect::<Result<HashMap<_, _>, I18nError>>()?;
        Ok(Self { bundles })
    }

    /// Look up a message in one language only.
    fn lookup(&self, language: Language, key: &str, args: Option<&FluentArgs<'_>>) -> Option<String> {
        let bundle = self.bundles.get(&language)?;
        let pattern = bundle.get_message(key)?.value()?;

        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::debug!(key, language = %language, ?errors, "Translation formatted with errors");
        }
        Some(value.into_owned())
    }

    /// Translate `key` with the fallback chain: `language`, English, the key.
    #[must_use]
    pub fn translate(&self, language: Language, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(value) = self.lookup(language, key, args) {
            return value;
        }
        if language != FALLBACK_LANGUAGE
            && let Some(value) = self.lookup(FALLBACK_LANGUAGE, key, args)
        {
            tracing::debug!(key, language = %language, "Translation missing, using fallback");
            return value;
        }
        tracing::debug!(key, language = %language, "Translation missing in all catalogs");
        key.to_owned()
    }

    /// Whether `language`'s own catalog defines `key`.
    #[must_use]
    pub fn has_message(&self, language: Language, key: &str) -> bool {
        self.bundles
            .get(&language)
            .is_some_and(|bundle| bundle.has_message(key))
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn build_bundle(
    language: Language,
    source: String,
) -> Result<FluentBundle<FluentResource>, I18nError> {
    let code = language.code();
    let langid: LanguageIdentifier = code.parse().map_err(|_| I18nError::LanguageId(code))?;

    let resource = FluentResource::try_new(source).map_err(|(_, errors)| I18nError::Syntax {
        language: code,
        count: errors.len(),
        first: errors.first().map(ToString::to_string).unwrap_or_default(),
    })?;

    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Bidi isolation marks would leak into attribute values and URLs.
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| I18nError::Duplicate {
            language: code,
            detail: errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        })?;
    Ok(bundle)
}

/// Request-scoped translation function bound to one language.
///
/// Templates call it as `{{ t.t("nav-dashboard") }}`.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    language: Language,
}

impl Translator {
    /// Bind the shared catalog to a language.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, language: Language) -> Self {
        Self { catalog, language }
    }

    /// Translate a message without arguments.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.catalog.translate(self.language, key, None)
    }

    /// Translate a message with named arguments.
    #[must_use]
    pub fn t_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.catalog.translate(self.language, key, Some(&fluent_args))
    }

    /// Label for a data key such as a record field or statistic.
    ///
    /// Uses the `{prefix}-{key}` message when one exists (underscores and
    /// dots become dashes), otherwise a humanized form of the key.
    #[must_use]
    pub fn label(&self, prefix: &str, key: &str) -> String {
        let message = format!("{prefix}-{}", key.replace(['_', '.'], "-"));
        if self.catalog.has_message(self.language, &message)
            || self.catalog.has_message(FALLBACK_LANGUAGE, &message)
        {
            return self.t(&message);
        }
        humanize(key)
    }

    /// The active language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Text direction of the active language.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.language.direction()
    }

    /// Whether the active language reads right-to-left.
    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        self.direction().is_rtl()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// `created_at` and `revenue.today` become `Created at` and `Revenue today`.
fn humanize(key: &str) -> String {
    let spaced = key.replace(['_', '.', '-'], " ");
    let mut chars = spaced.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn translator(language: Language) -> Translator {
        Translator::new(Arc::new(Catalog::load().unwrap()), language)
    }

    fn message_ids(language: Language) -> BTreeSet<String> {
        let file = Locales::get(&format!("{}.ftl", language.code())).unwrap();
        String::from_utf8(file.data.into_owned())
            .unwrap()
            .lines()
            .filter(|line| line.starts_with(|c: char| c.is_ascii_lowercase()))
            .filter_map(|line| line.split_once(" =").map(|(id, _)| id.trim().to_owned()))
            .collect()
    }

    #[test]
    fn test_catalogs_load() {
        let catalog = Catalog::load().unwrap();
        for language in Language::ALL {
            assert!(catalog.has_message(language, "nav-dashboard"));
        }
    }

    #[test]
    fn test_catalogs_define_the_same_keys() {
        let en = message_ids(Language::En);
        let ar = message_ids(Language::Ar);
        assert!(!en.is_empty());
        let missing: Vec<_> = en.difference(&ar).collect();
        let extra: Vec<_> = ar.difference(&en).collect();
        assert!(missing.is_empty(), "missing in ar: {missing:?}");
        assert!(extra.is_empty(), "only in ar: {extra:?}");
    }

    #[test]
    fn test_translate_active_language() {
        assert_eq!(translator(Language::En).t("nav-dashboard"), "Dashboard");
        assert_eq!(translator(Language::Ar).t("nav-dashboard"), "لوحة التحكم");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let t = translator(Language::Ar);
        assert_eq!(t.t("no-such-message"), "no-such-message");
    }

    #[test]
    fn test_missing_translation_falls_back_to_english() {
        let catalog = Catalog::from_sources([
            (Language::En, "greeting = Hello\nfarewell = Goodbye\n".to_owned()),
            (Language::Ar, "greeting = مرحبا\n".to_owned()),
        ])
        .unwrap();
        let t = Translator::new(Arc::new(catalog), Language::Ar);

        assert_eq!(t.t("greeting"), "مرحبا");
        assert_eq!(t.t("farewell"), "Goodbye");
        assert_eq!(t.t("unknown"), "unknown");
    }

    #[test]
    fn test_duplicate_message_is_rejected() {
        let err = Catalog::from_sources([(Language::En, "a = 1\na = 2\n".to_owned())]).unwrap_err();
        assert!(matches!(err, I18nError::Duplicate { language: "en", .. }));
    }

    #[test]
    fn test_arguments_are_interpolated_without_isolation_marks() {
        let t = translator(Language::En);
        assert_eq!(
            t.t_args("table-page", &[("page", "2"), ("last", "5")]),
            "Page 2 of 5"
        );
    }

    #[test]
    fn test_label_prefers_catalog_then_humanizes() {
        let t = translator(Language::En);
        assert_eq!(t.label("field", "expires_at"), "Expires");
        assert_eq!(t.label("field", "gift_wrap_note"), "Gift wrap note");
        assert_eq!(t.label("stat", "revenue.today"), "Revenue today");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_direction_follows_language() {
        assert!(translator(Language::Ar).is_rtl());
        let en = translator(Language::En);
        assert_eq!(en.direction(), Direction::Ltr);
        assert_eq!(en.language(), Language::En);
    }
}
