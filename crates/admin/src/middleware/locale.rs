//! Per-request language resolution.
//!
//! The active language comes from, in order: the session, the browser's
//! `Accept-Language` header, and the configured default.

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use tower_sessions::Session;

use hadawi_core::Language;

use crate::i18n::Translator;
use crate::models::session_keys;
use crate::state::AppState;

/// Extractor yielding a [`Translator`] for the request's language.
pub struct Locale(pub Translator);

impl FromRequestParts<AppState> for Locale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let stored = match parts.extensions.get::<Session>() {
            Some(session) => stored_language(session).await,
            None => None,
        };

        let header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        let language = resolve_language(stored, header, state.config().default_language);
        Ok(Self(state.translator(language)))
    }
}

/// Pick the request language from its three sources.
#[must_use]
pub fn resolve_language(
    stored: Option<Language>,
    accept_language: Option<&str>,
    default: Language,
) -> Language {
    stored
        .or_else(|| accept_language.and_then(Language::from_accept_language))
        .unwrap_or(default)
}

/// The language saved in the session, if any.
pub async fn stored_language(session: &Session) -> Option<Language> {
    match session.get::<Language>(session_keys::LANGUAGE).await {
        Ok(language) => language,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read language from session");
            None
        }
    }
}

/// Persist the chosen language for this browser.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn store_language(
    session: &Session,
    language: Language,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::LANGUAGE, language).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wins() {
        assert_eq!(
            resolve_language(Some(Language::Ar), Some("en-US"), Language::En),
            Language::Ar
        );
    }

    #[test]
    fn test_header_before_default() {
        assert_eq!(
            resolve_language(None, Some("ar-SA,ar;q=0.9"), Language::En),
            Language::Ar
        );
        assert_eq!(
            resolve_language(None, Some("fr-FR"), Language::Ar),
            Language::Ar
        );
        assert_eq!(resolve_language(None, None, Language::En), Language::En);
    }
}
