//! UI language and text direction.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a language code is not supported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported language: {0}")]
pub struct LanguageError(pub String);

/// Text direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Whether this is right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// A language the admin panel is translated into.
///
/// Exactly two languages are supported and [`Language::toggled`] flips
/// between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Arabic.
    Ar,
}

impl Language {
    /// All supported languages, in switcher order.
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    /// ISO 639-1 code, also used for the HTML `lang` attribute.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// The language's own name for itself, shown on the switcher.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }

    /// Text direction for this language.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::En => Direction::Ltr,
            Self::Ar => Direction::Rtl,
        }
    }

    /// The other supported language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Parse a language code, tolerating case and region subtags
    /// (`ar-SA`, `en_GB`).
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError`] if the primary subtag is not supported.
    pub fn parse(code: &str) -> Result<Self, LanguageError> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(LanguageError(code.to_owned())),
        }
    }

    /// Pick the first supported language from an `Accept-Language` header
    /// value, honouring `q` weights.
    #[must_use]
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut candidates: Vec<(f32, usize, Self)> = header
            .split(',')
            .enumerate()
            .filter_map(|(index, entry)| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let quality = parts
                    .find_map(|param| param.trim().strip_prefix("q="))
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                let language = Self::parse(tag).ok()?;
                (quality > 0.0).then_some((quality, index, language))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        candidates.first().map(|&(_, _, language)| language)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_a_two_cycle() {
        for start in Language::ALL {
            let once = start.toggled();
            assert_ne!(once, start);
            assert_eq!(once.toggled(), start);
            assert_ne!(once.direction(), start.direction());
        }
    }

    #[test]
    fn test_direction() {
        assert_eq!(Language::En.direction(), Direction::Ltr);
        assert!(Language::Ar.direction().is_rtl());
        assert_eq!(Direction::Rtl.as_str(), "rtl");
    }

    #[test]
    fn test_parse_tolerates_regions_and_case() {
        assert_eq!(Language::parse("ar-SA").unwrap(), Language::Ar);
        assert_eq!(Language::parse("EN_gb").unwrap(), Language::En);
        assert!(Language::parse("fr").is_err());
        assert!(Language::parse("").is_err());
    }

    #[test]
    fn test_accept_language_prefers_weight() {
        assert_eq!(
            Language::from_accept_language("fr-FR, en;q=0.5, ar;q=0.9"),
            Some(Language::Ar)
        );
        assert_eq!(
            Language::from_accept_language("en-US,en;q=0.9"),
            Some(Language::En)
        );
        assert_eq!(Language::from_accept_language("de, fr;q=0.8"), None);
        assert_eq!(Language::from_accept_language("ar;q=0"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Ar).unwrap(), "\"ar\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }
}
